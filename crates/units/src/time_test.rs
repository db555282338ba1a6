mod tests {
    use approx::assert_relative_eq;

    use crate::time::{Time, SECONDS_PER_YEAR};

    #[test]
    fn test_time_conversions() {
        let year = Time::from_years(1.0);
        assert_relative_eq!(year.to_seconds(), SECONDS_PER_YEAR);

        let from_seconds = Time::from_seconds(SECONDS_PER_YEAR);
        assert_relative_eq!(from_seconds.to_years(), 1.0);

        // Youngest node of the cooling-grid age axis, 10^6.1 yr
        let young = Time::from_years(10f64.powf(6.1));
        assert_relative_eq!(young.to_gyr(), 10f64.powf(-2.9), max_relative = 1e-12);

        let old = Time::from_gyr(6.3);
        assert_relative_eq!(old.to_years(), 6.3e9);
    }

    #[test]
    fn test_time_arithmetic_and_ordering() {
        let age = Time::from_gyr(1.0);
        let dt = Time::from_years(5.0e5);

        let later = age + dt;
        assert!(later > age);
        assert_relative_eq!((later - age).to_years(), 5.0e5, epsilon = 1e-6);
        assert_relative_eq!((dt * 2.0).to_years(), 1.0e6);
        assert_relative_eq!((2.0 * dt).to_years(), 1.0e6);
        assert_eq!(Time::zero().to_years(), 0.0);
    }
}
