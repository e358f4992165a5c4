//! Deterministic technical-analysis signal generation.
//!
//! [`analyze`] turns a daily close/volume series into a structured
//! [`SignalReport`]: trend, momentum, volume, volatility, levels, and a
//! breakout probability. The whole computation is pure; fetching the
//! series and rendering the report are the caller's concern.
//!
//! A report is all-or-nothing. A series shorter than the longest rolling
//! window fails with [`SignalError::InsufficientData`] and never produces
//! partial metrics.

use chrono::{DateTime, Utc};

use crate::error::SignalError;

/// Spans of the two trend EMAs.
const EMA_FAST: usize = 9;
const EMA_SLOW: usize = 21;
/// Wilder RSI window.
const RSI_PERIOD: usize = 14;
/// Volume z-score window.
const VOLUME_WINDOW: usize = 20;
/// Latest volume above this multiple of the rolling mean counts as a spike.
const VOLUME_SPIKE_RATIO: f64 = 1.5;
/// ATR window.
const ATR_PERIOD: usize = 14;
/// Support/resistance lookback.
const LEVEL_WINDOW: usize = 5;
/// Minimum samples for a full report (the slow EMA span dominates).
const MIN_SAMPLES: usize = EMA_SLOW;

/// One daily sample of a price series, ascending by time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub volume: f64,
}

/// An ordered close/volume series. Read-only once fetched.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    samples: Vec<PriceSample>,
}

impl PriceSeries {
    #[must_use]
    pub fn new(samples: Vec<PriceSample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }
}

/// EMA-crossover trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
}

/// RSI classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Momentum {
    Oversold,
    Neutral,
    Overbought,
}

/// Everything the presenter needs to render an advisory signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalReport {
    pub trend: Trend,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub momentum: Momentum,
    pub volume_zscore: f64,
    pub volume_spike: bool,
    pub atr: f64,
    pub support: f64,
    pub resistance: f64,
    /// Logistic breakout score as a percentage in `[0, 100]`.
    pub breakout_pct: f64,
    /// Latest close sits strictly inside the previous bar's range.
    pub inside_bar: bool,
    pub entry: f64,
    pub stop: f64,
    pub target1: f64,
    pub target2: f64,
}

/// Compute the full signal report for a series.
///
/// # Errors
///
/// Returns [`SignalError::InsufficientData`] when the series is shorter
/// than the longest rolling window (21 samples).
pub fn analyze(series: &PriceSeries) -> Result<SignalReport, SignalError> {
    let samples = series.samples();
    if samples.len() < MIN_SAMPLES {
        return Err(SignalError::InsufficientData {
            have: samples.len(),
            need: MIN_SAMPLES,
        });
    }

    let closes: Vec<f64> = samples.iter().map(|s| s.close).collect();
    let volumes: Vec<f64> = samples.iter().map(|s| s.volume).collect();
    let price = closes[closes.len() - 1];

    let ema_fast = ema(&closes, EMA_FAST);
    let ema_slow = ema(&closes, EMA_SLOW);
    let trend = if ema_fast > ema_slow {
        Trend::Bullish
    } else {
        Trend::Bearish
    };

    let rsi = wilder_rsi(&closes, RSI_PERIOD);
    let momentum = if rsi < 30.0 {
        Momentum::Oversold
    } else if rsi > 70.0 {
        Momentum::Overbought
    } else {
        Momentum::Neutral
    };

    let (volume_zscore, volume_spike) = volume_profile(&volumes, VOLUME_WINDOW);

    // No native OHLC in a close-only series; approximate each bar's range
    // from the current and previous close.
    let highs: Vec<f64> = synthetic_extremes(&closes, f64::max);
    let lows: Vec<f64> = synthetic_extremes(&closes, f64::min);

    let atr = average_true_range(&highs, &lows, &closes, ATR_PERIOD);

    let support = rolling_edge(&lows, LEVEL_WINDOW, f64::min);
    let resistance = rolling_edge(&highs, LEVEL_WINDOW, f64::max);

    let proximity = if resistance > 0.0 {
        (1.0 - (resistance - price).abs() / resistance).max(0.0)
    } else {
        0.0
    };
    let raw_score = 1.5 * proximity + 0.5 * volume_zscore.max(0.0);
    let breakout_pct = logistic(raw_score) * 100.0;

    let prev = samples.len() - 2;
    let inside_bar = price > lows[prev] && price < highs[prev];

    Ok(SignalReport {
        trend,
        ema_fast,
        ema_slow,
        rsi,
        momentum,
        volume_zscore,
        volume_spike,
        atr,
        support,
        resistance,
        breakout_pct,
        inside_bar,
        entry: price,
        stop: support - 0.5 * atr,
        target1: resistance + atr,
        target2: resistance + 1.5 * atr,
    })
}

/// Exponential moving average over the full series, seeded at the first
/// value, evaluated at the latest sample.
fn ema(values: &[f64], period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut current = values[0];
    for value in &values[1..] {
        current = current * (1.0 - alpha) + value * alpha;
    }
    current
}

/// Wilder-smoothed RSI evaluated at the latest sample.
///
/// Zero average loss means no down-move was observed in the window and
/// saturates at 100 rather than dividing by zero.
fn wilder_rsi(closes: &[f64], period: usize) -> f64 {
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        if i <= period {
            avg_gain += gain / period as f64;
            avg_loss += loss / period as f64;
        } else {
            avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
            avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        }
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Z-score of the latest volume against its rolling window, plus the
/// spike flag against the rolling mean.
fn volume_profile(volumes: &[f64], window: usize) -> (f64, bool) {
    let tail = &volumes[volumes.len().saturating_sub(window)..];
    let n = tail.len() as f64;
    let mean = tail.iter().sum::<f64>() / n;
    let variance = tail.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();

    let latest = volumes[volumes.len() - 1];
    let zscore = if std > 0.0 { (latest - mean) / std } else { 0.0 };
    let spike = latest > VOLUME_SPIKE_RATIO * mean;
    (zscore, spike)
}

/// Per-bar synthetic high/low: the extreme of the current and previous
/// close. The first bar has no predecessor and uses its own close.
fn synthetic_extremes(closes: &[f64], pick: fn(f64, f64) -> f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(closes.len());
    out.push(closes[0]);
    for i in 1..closes.len() {
        out.push(pick(closes[i], closes[i - 1]));
    }
    out
}

/// Rolling mean of the true range over the last `period` bars.
fn average_true_range(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    let mut ranges = Vec::with_capacity(closes.len() - 1);
    for i in 1..closes.len() {
        let prev_close = closes[i - 1];
        let tr = (highs[i] - lows[i])
            .max((highs[i] - prev_close).abs())
            .max((lows[i] - prev_close).abs());
        ranges.push(tr);
    }
    let tail = &ranges[ranges.len().saturating_sub(period)..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// Extreme of the last `window` values.
fn rolling_edge(values: &[f64], window: usize, pick: fn(f64, f64) -> f64) -> f64 {
    let tail = &values[values.len().saturating_sub(window)..];
    tail.iter().copied().fold(tail[0], pick)
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(closes: &[f64], volumes: &[f64]) -> PriceSeries {
        assert_eq!(closes.len(), volumes.len());
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| PriceSample {
                timestamp: start + chrono::Duration::days(i as i64),
                close,
                volume,
            })
            .collect();
        PriceSeries::new(samples)
    }

    fn flat_volumes(n: usize) -> Vec<f64> {
        vec![1_000.0; n]
    }

    #[test]
    fn short_series_is_rejected_whole() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = analyze(&series(&closes, &flat_volumes(20)));
        assert_eq!(
            result.unwrap_err(),
            SignalError::InsufficientData { have: 20, need: 21 }
        );
    }

    #[test]
    fn monotonically_rising_series_saturates_rsi() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert_eq!(report.rsi, 100.0);
        assert_eq!(report.momentum, Momentum::Overbought);
        assert_eq!(report.trend, Trend::Bullish);
    }

    #[test]
    fn monotonically_falling_series_is_bearish_and_oversold() {
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert_eq!(report.rsi, 0.0);
        assert_eq!(report.momentum, Momentum::Oversold);
        assert_eq!(report.trend, Trend::Bearish);
    }

    #[test]
    fn flat_volume_has_no_spike_and_zero_zscore() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert_eq!(report.volume_zscore, 0.0);
        assert!(!report.volume_spike);
    }

    #[test]
    fn volume_burst_flags_spike_and_positive_zscore() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let mut volumes = flat_volumes(30);
        volumes[29] = 10_000.0;
        let report = analyze(&series(&closes, &volumes)).unwrap();
        assert!(report.volume_spike);
        assert!(report.volume_zscore > 1.0);
    }

    #[test]
    fn levels_bracket_the_recent_range() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert!(report.support <= report.resistance);
        assert!(report.target1 > report.resistance);
        assert!(report.target2 > report.target1);
        assert!(report.stop < report.support);
    }

    #[test]
    fn breakout_probability_is_a_percentage() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert!(report.breakout_pct > 0.0 && report.breakout_pct < 100.0);
        // Price at the 5-bar high means full proximity, so the logistic
        // of 1.5 dominates.
        assert!(report.breakout_pct > 50.0);
    }

    #[test]
    fn inside_bar_detected_when_close_sits_in_previous_range() {
        let mut closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        // Previous bar spans [127, 128]; a close of 127.5 sits inside it.
        closes[29] = 127.5;
        let report = analyze(&series(&closes, &flat_volumes(30))).unwrap();
        assert!(report.inside_bar);
    }

    #[test]
    fn exact_minimum_window_is_accepted() {
        let closes: Vec<f64> = (0..21).map(|i| 100.0 + i as f64).collect();
        assert!(analyze(&series(&closes, &flat_volumes(21))).is_ok());
    }
}
