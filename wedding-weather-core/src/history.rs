//! Multi-year historical averaging.
//!
//! When the wedding is beyond the live forecast window, the same
//! calendar day is fetched from the climate archive for each of the
//! previous five years (concurrently) and whichever years succeed are
//! combined into one synthetic 24-hour profile.

use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use tracing::warn;

use crate::{
    model::{DailySummary, DayProfile, HourlyForecastPoint, WeatherCode, hour_label},
    provider::{ArchiveDay, ArchiveProvider},
};

pub const YEARS_BACK: i32 = 5;

/// An hour counts as "rainy" in a given year above this amount (inches).
const RAIN_THRESHOLD_IN: f64 = 0.01;

/// Fetch the target month/day from each of the previous [`YEARS_BACK`]
/// years and aggregate whichever fetches succeed. Returns `None` only
/// when every year fails (or the date exists in no candidate year,
/// which can happen for Feb 29).
pub async fn averaged_profile(
    archive: &dyn ArchiveProvider,
    target: NaiveDate,
) -> Option<DayProfile> {
    // Feb 29 targets simply skip years without that date.
    let dates: Vec<NaiveDate> = (1..=YEARS_BACK)
        .filter_map(|back| {
            NaiveDate::from_ymd_opt(target.year() - back, target.month(), target.day())
        })
        .collect();

    let results = join_all(dates.iter().map(|date| archive.fetch_day(*date))).await;

    let mut years = Vec::with_capacity(dates.len());
    for (date, result) in dates.iter().zip(results) {
        match result {
            Ok(day) => years.push(day),
            Err(e) => warn!(year = date.year(), error = %e, "archive fetch failed"),
        }
    }

    if years.is_empty() {
        return None;
    }

    Some(aggregate(&years))
}

/// Combine one or more archive days into a single day profile.
pub(crate) fn aggregate(years: &[ArchiveDay]) -> DayProfile {
    let mut points = Vec::with_capacity(24);
    let mut day_codes = Vec::with_capacity(24);

    for hour in 0u8..24 {
        let h = usize::from(hour);

        let code = mode(
            years
                .iter()
                .filter_map(|y| y.weather_code.get(h).copied().flatten()),
        );
        if let Some(code) = code {
            day_codes.push(code);
        }

        points.push(HourlyForecastPoint {
            hour,
            time: hour_label(hour),
            temperature: mean_at(years, h, |y| &y.temperature),
            feels_like: mean_at(years, h, |y| &y.feels_like),
            humidity: mean_at(years, h, |y| &y.humidity),
            precipitation_probability: rain_probability(years, h),
            precipitation: mean_at(years, h, |y| &y.precipitation),
            weather_code: code.map_or(WeatherCode::Unknown, WeatherCode::from_wmo),
            wind_speed: mean_at(years, h, |y| &y.wind_speed),
            wind_gusts: mean_at(years, h, |y| &y.wind_gusts),
            cloud_cover: mean_at(years, h, |y| &y.cloud_cover),
            uv_index: uv_for_hour(hour),
        });
    }

    // Daily max/min are the mean of each year's own extremes, not the
    // extremes of the hourly-averaged series. Sunrise/sunset come from
    // the first year that reported them.
    let yearly_max: Vec<f64> = years.iter().filter_map(|y| y.temperature_max).collect();
    let yearly_min: Vec<f64> = years.iter().filter_map(|y| y.temperature_min).collect();

    let daily = DailySummary {
        temperature_max: mean(&yearly_max),
        temperature_min: mean(&yearly_min),
        precipitation_probability_max: points
            .iter()
            .map(|p| p.precipitation_probability)
            .fold(0.0, f64::max),
        sunrise: years.iter().find_map(|y| y.sunrise.clone()),
        sunset: years.iter().find_map(|y| y.sunset.clone()),
        uv_index_max: points.iter().map(|p| p.uv_index).fold(0.0, f64::max),
        weather_code: mode(day_codes.iter().copied())
            .map_or(WeatherCode::Unknown, WeatherCode::from_wmo),
    };

    DayProfile {
        hourly: points,
        daily,
    }
}

/// Arithmetic mean; an empty set yields 0.0, never NaN.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn mean_at<F>(years: &[ArchiveDay], hour: usize, field: F) -> f64
where
    F: Fn(&ArchiveDay) -> &Vec<Option<f64>>,
{
    let defined: Vec<f64> = years
        .iter()
        .filter_map(|y| field(y).get(hour).copied().flatten())
        .collect();
    mean(&defined)
}

/// Empirical rain frequency for an hour: the share of years that saw
/// measurable precipitation then, among years with data for that hour.
/// Not an intensity average.
fn rain_probability(years: &[ArchiveDay], hour: usize) -> f64 {
    let defined: Vec<f64> = years
        .iter()
        .filter_map(|y| y.precipitation.get(hour).copied().flatten())
        .collect();

    if defined.is_empty() {
        return 0.0;
    }

    let rainy = defined.iter().filter(|&&p| p > RAIN_THRESHOLD_IN).count();
    (rainy as f64 / defined.len() as f64 * 100.0).round()
}

/// Most frequent value; ties go to whichever value was seen first.
/// The frequency table is a Vec to keep insertion order deterministic.
pub(crate) fn mode<T, I>(values: I) -> Option<T>
where
    T: PartialEq + Copy,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

/// The archive carries no UV observations, so UV is assigned from a
/// fixed table by venue-local hour: zero outside 8am-6pm, moderate at
/// the edges of that window, peak only around midday. Accuracy here is
/// bounded by the table, not by measured data.
pub(crate) fn uv_for_hour(hour: u8) -> f64 {
    match hour {
        12..=13 => 10.0,
        10..=11 | 14..=15 => 7.0,
        8..=9 | 16..=17 => 4.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Datelike;
    use crate::error::WeatherError;

    fn uniform_day(temp: f64, precip: f64, code: i32) -> ArchiveDay {
        ArchiveDay {
            temperature: vec![Some(temp); 24],
            feels_like: vec![Some(temp + 4.0); 24],
            humidity: vec![Some(70.0); 24],
            precipitation: vec![Some(precip); 24],
            wind_speed: vec![Some(6.0); 24],
            wind_gusts: vec![Some(10.0); 24],
            cloud_cover: vec![Some(40.0); 24],
            weather_code: vec![Some(code); 24],
            temperature_max: Some(temp + 10.0),
            temperature_min: Some(temp - 10.0),
            sunrise: Some("T06:30".into()),
            sunset: Some("T20:30".into()),
        }
    }

    #[test]
    fn missing_hours_are_excluded_from_that_field_only() {
        let mut a = uniform_day(80.0, 0.0, 1);
        let mut b = uniform_day(90.0, 0.0, 1);
        let mut c = uniform_day(100.0, 0.0, 1);
        a.temperature[14] = Some(80.0);
        b.temperature[14] = Some(90.0);
        c.temperature[14] = None;
        // The year missing hour 14's temperature still contributes its
        // humidity at that hour.
        c.humidity[14] = Some(100.0);

        let profile = aggregate(&[a, b, c]);
        assert_eq!(profile.hourly[14].temperature, 85.0);
        assert_eq!(profile.hourly[14].humidity, 80.0);
    }

    #[test]
    fn rain_probability_is_an_empirical_frequency() {
        let mut years = vec![
            uniform_day(85.0, 0.5, 61),
            uniform_day(85.0, 0.2, 61),
            uniform_day(85.0, 0.0, 1),
            uniform_day(85.0, 0.005, 1),
        ];
        // Trace amounts at or below the threshold do not count as rain.
        years[3].precipitation[9] = Some(0.01);

        let profile = aggregate(&years);
        assert_eq!(profile.hourly[9].precipitation_probability, 50.0);
        assert_eq!(profile.hourly[10].precipitation_probability, 50.0);
    }

    #[test]
    fn rain_probability_counts_only_years_with_data() {
        let mut a = uniform_day(85.0, 0.3, 61);
        let mut b = uniform_day(85.0, 0.0, 1);
        let mut c = uniform_day(85.0, 0.0, 1);
        a.precipitation[6] = Some(0.3);
        b.precipitation[6] = None;
        c.precipitation[6] = Some(0.0);

        // Two years have data at hour 6, one of them rainy.
        let profile = aggregate(&[a, b, c]);
        assert_eq!(profile.hourly[6].precipitation_probability, 50.0);
    }

    #[test]
    fn mode_tie_breaks_to_first_inserted() {
        assert_eq!(mode([1, 2, 1, 2]), Some(1));
        assert_eq!(mode([2, 1, 2, 1]), Some(2));
        assert_eq!(mode([3, 1, 1, 3, 2]), Some(3));
        assert_eq!(mode::<i32, _>([]), None);
    }

    #[test]
    fn empty_mean_is_zero_not_nan() {
        assert_eq!(mean(&[]), 0.0);

        let mut a = uniform_day(80.0, 0.0, 1);
        a.wind_gusts = vec![None; 24];
        let mut b = uniform_day(90.0, 0.0, 1);
        b.wind_gusts = vec![None; 24];

        let profile = aggregate(&[a, b]);
        assert_eq!(profile.hourly[5].wind_gusts, 0.0);
    }

    #[test]
    fn daily_extremes_average_each_years_own_extremes() {
        // Hourly series are flat 85/86 but the years' recorded maxima
        // are 95 and 96; the summary must use the latter.
        let a = uniform_day(85.0, 0.0, 1);
        let b = uniform_day(86.0, 0.0, 1);

        let profile = aggregate(&[a, b]);
        assert_eq!(profile.daily.temperature_max, 95.5);
        assert_eq!(profile.daily.temperature_min, 75.5);
    }

    #[test]
    fn sunrise_comes_from_first_reporting_year() {
        let mut a = uniform_day(85.0, 0.0, 1);
        a.sunrise = None;
        a.sunset = None;
        let mut b = uniform_day(85.0, 0.0, 1);
        b.sunrise = Some("2021-06-20T06:31".into());
        b.sunset = Some("2021-06-20T20:27".into());
        let mut c = uniform_day(85.0, 0.0, 1);
        c.sunrise = Some("2020-06-20T06:29".into());

        let profile = aggregate(&[a, b, c]);
        assert_eq!(profile.daily.sunrise.as_deref(), Some("2021-06-20T06:31"));
        assert_eq!(profile.daily.sunset.as_deref(), Some("2021-06-20T20:27"));
    }

    #[test]
    fn uv_follows_the_fixed_hour_table() {
        assert_eq!(uv_for_hour(3), 0.0);
        assert_eq!(uv_for_hour(8), 4.0);
        assert_eq!(uv_for_hour(11), 7.0);
        assert_eq!(uv_for_hour(12), 10.0);
        assert_eq!(uv_for_hour(13), 10.0);
        assert_eq!(uv_for_hour(15), 7.0);
        assert_eq!(uv_for_hour(17), 4.0);
        assert_eq!(uv_for_hour(18), 0.0);
        assert_eq!(uv_for_hour(23), 0.0);
    }

    #[test]
    fn daily_probability_max_spans_the_hourly_series() {
        let mut a = uniform_day(85.0, 0.0, 1);
        let b = uniform_day(85.0, 0.0, 1);
        a.precipitation[15] = Some(0.4);

        let profile = aggregate(&[a, b]);
        assert_eq!(profile.hourly[15].precipitation_probability, 50.0);
        assert_eq!(profile.daily.precipitation_probability_max, 50.0);
    }

    #[derive(Debug)]
    struct ScriptedArchive {
        ok_years: Vec<i32>,
    }

    #[async_trait]
    impl ArchiveProvider for ScriptedArchive {
        async fn fetch_day(&self, date: NaiveDate) -> Result<ArchiveDay, WeatherError> {
            if self.ok_years.contains(&date.year()) {
                Ok(uniform_day(85.0, 0.0, 2))
            } else {
                Err(WeatherError::UpstreamStatus {
                    provider: "open-meteo archive",
                    status: 503,
                    body: String::new(),
                })
            }
        }
    }

    #[tokio::test]
    async fn partial_year_failures_are_averaged_around() {
        let archive = ScriptedArchive {
            ok_years: vec![2024, 2022],
        };
        let target = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();

        let profile = averaged_profile(&archive, target).await.unwrap();
        assert_eq!(profile.hourly.len(), 24);
        assert_eq!(profile.hourly[12].temperature, 85.0);
        assert_eq!(profile.daily.weather_code, WeatherCode::PartlyCloudy);
    }

    #[tokio::test]
    async fn total_failure_returns_none() {
        let archive = ScriptedArchive { ok_years: vec![] };
        let target = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();

        assert!(averaged_profile(&archive, target).await.is_none());
    }
}
