use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

use crate::error::{Result, SpiralError};

/// A day's position on the spiral.
///
/// `angle` is absolute and unbounded, so the number of windings is implicit in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralPoint {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub radius: f64,
}

/// Maps calendar dates onto an Archimedean spiral.
///
/// The start date sits at the angle its day of the year would have on a clock
/// face with January 1st pointing north; every day advances the angle by one
/// step, and the radius grows linearly from a sixth to half the canvas over one
/// revolution per calendar year touched by the range.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralProjector {
    start_date: NaiveDate,
    center: f64,
    inner_radius: f64,
    outer_radius: f64,
    angular_increment: f64,
    start_angle: f64,
    turns: u32,
}

impl SpiralProjector {
    pub fn new(
        canvas_size: u32,
        steps_per_revolution: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if canvas_size == 0 {
            return Err(SpiralError::InvalidCanvasSize(canvas_size));
        }
        if steps_per_revolution == 0 {
            return Err(SpiralError::InvalidStepsPerRevolution(steps_per_revolution));
        }
        if end_date.year() < start_date.year() {
            return Err(SpiralError::InvertedDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let size = f64::from(canvas_size);
        let day_of_year = f64::from(start_date.ordinal());

        Ok(Self {
            start_date,
            center: size / 2.0,
            inner_radius: size / 6.0,
            outer_radius: size / 2.0,
            angular_increment: 2.0 * PI / f64::from(steps_per_revolution),
            start_angle: (day_of_year / 365.0 * 360.0 + 270.0).to_radians(),
            turns: (end_date.year() - start_date.year() + 1) as u32,
        })
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn angular_increment(&self) -> f64 {
        self.angular_increment
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whole days from the start date; negative before it.
    pub fn days_since_start(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.start_date).num_days()
    }

    pub fn project(&self, date: NaiveDate) -> SpiralPoint {
        let angle = self.start_angle + self.days_since_start(date) as f64 * self.angular_increment;
        let sweep = f64::from(self.turns) * 2.0 * PI;
        let radius = self.inner_radius + (self.outer_radius - self.inner_radius) * (angle - self.start_angle) / sweep;

        SpiralPoint {
            x: self.center + radius * angle.cos(),
            y: self.center + radius * angle.sin(),
            angle,
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn projector_2020() -> SpiralProjector {
        SpiralProjector::new(2800, 365, date(2020, 1, 1), date(2020, 12, 31)).unwrap()
    }

    #[test]
    fn test_derived_parameters() {
        let spiral = projector_2020();
        assert_eq!(spiral.center(), 1400.0);
        assert_eq!(spiral.outer_radius(), 1400.0);
        assert!((spiral.inner_radius() - 2800.0 / 6.0).abs() < 1e-9);
        assert_eq!(spiral.turns(), 1);
        assert!((spiral.angular_increment() - 2.0 * PI / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_start_angle_near_north() {
        let spiral = projector_2020();
        let expected = (1.0 / 365.0 * 360.0 + 270.0_f64).to_radians();
        assert_eq!(spiral.start_angle(), expected);
        assert!((spiral.start_angle() - 4.71239).abs() < 0.02);
    }

    #[test]
    fn test_start_date_projects_to_start_angle() {
        let spiral = projector_2020();
        let point = spiral.project(date(2020, 1, 1));
        assert_eq!(point.angle, spiral.start_angle());
        assert_eq!(point.radius, spiral.inner_radius());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = projector_2020().project(date(2020, 7, 14));
        let b = projector_2020().project(date(2020, 7, 14));
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.angle.to_bits(), b.angle.to_bits());
        assert_eq!(a.radius.to_bits(), b.radius.to_bits());
    }

    #[test]
    fn test_full_revolution_reaches_outer_radius() {
        let spiral = projector_2020();
        // 2020 is a leap year, so Dec 31st is 365 days after Jan 1st.
        let point = spiral.project(date(2020, 12, 31));
        assert!((point.radius - spiral.outer_radius()).abs() < 1e-9);
        assert!((point.angle - spiral.start_angle() - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_turns_follow_calendar_years() {
        let spiral = SpiralProjector::new(1000, 365, date(2019, 12, 30), date(2021, 1, 2)).unwrap();
        assert_eq!(spiral.turns(), 3);
    }

    #[test]
    fn test_point_lies_at_radius_from_center() {
        let spiral = SpiralProjector::new(1000, 365, date(2018, 3, 1), date(2021, 6, 1)).unwrap();
        let point = spiral.project(date(2019, 8, 20));
        let dx = point.x - spiral.center();
        let dy = point.y - spiral.center();
        assert!(((dx * dx + dy * dy).sqrt() - point.radius).abs() < 1e-9);
    }

    #[test]
    fn test_radius_grows_with_time() {
        let spiral = SpiralProjector::new(1000, 365, date(2018, 3, 1), date(2021, 6, 1)).unwrap();
        let early = spiral.project(date(2018, 6, 1));
        let late = spiral.project(date(2020, 6, 1));
        assert!(late.radius > early.radius);
        assert!(late.angle > early.angle);
    }

    #[test]
    fn test_dates_before_start_extrapolate_backwards() {
        let spiral = projector_2020();
        assert_eq!(spiral.days_since_start(date(2019, 12, 31)), -1);
        let point = spiral.project(date(2019, 12, 31));
        assert!(point.angle < spiral.start_angle());
        assert!(point.radius < spiral.inner_radius());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            SpiralProjector::new(2800, 0, date(2020, 1, 1), date(2020, 2, 1)),
            Err(SpiralError::InvalidStepsPerRevolution(0))
        ));
        assert!(matches!(
            SpiralProjector::new(0, 365, date(2020, 1, 1), date(2020, 2, 1)),
            Err(SpiralError::InvalidCanvasSize(0))
        ));
        assert!(matches!(
            SpiralProjector::new(2800, 365, date(2021, 1, 1), date(2020, 2, 1)),
            Err(SpiralError::InvertedDateRange { .. })
        ));
    }
}
