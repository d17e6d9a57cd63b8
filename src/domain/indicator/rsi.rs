//! RSI (Relative Strength Index) over per-bar open-to-close changes.
//!
//! Per-bar change = close - open. Average gain and loss are simple moving
//! averages over `window` changes, so the output has one value per full
//! window (a valid-mode convolution: len - window + 1 values).
//!
//! Formula: RSI = 100 - 100 / (1 + avg_gain / (avg_loss + epsilon)), the
//! epsilon guarding the all-gain case.
//!
//! With fewer than `window + min_entries` bars the series is not considered
//! meaningful and the neutral value 50 is returned, repeated `window` times.

const EPSILON: f64 = 1e-6;
const DEFAULT_LIMIT: usize = 1000;
const DEFAULT_MIN_ENTRIES: usize = 10;

/// RSI with default history cap (1000 bars) and warmup floor (10 entries).
pub fn rsi(open: &[f64], close: &[f64], window: usize) -> Vec<f64> {
    rsi_with(open, close, window, DEFAULT_LIMIT, DEFAULT_MIN_ENTRIES)
}

/// `limit` caps how much trailing history is consumed; `min_entries` is the
/// number of bars required beyond the window before values are emitted.
pub fn rsi_with(
    open: &[f64],
    close: &[f64],
    window: usize,
    limit: usize,
    min_entries: usize,
) -> Vec<f64> {
    let len = open.len().min(close.len());
    let start = len.saturating_sub(limit);
    let changes: Vec<f64> = (start..len).map(|i| close[i] - open[i]).collect();

    if window == 0 || changes.len() < window + min_entries {
        return vec![50.0; window];
    }

    let mut gain_sum: f64 = changes[..window].iter().filter(|&&c| c > 0.0).sum();
    let mut loss_sum: f64 = -changes[..window].iter().filter(|&&c| c < 0.0).sum::<f64>();

    let mut out = Vec::with_capacity(changes.len() - window + 1);
    out.push(rsi_value(gain_sum, loss_sum, window));

    for i in window..changes.len() {
        let incoming = changes[i];
        let outgoing = changes[i - window];
        if incoming > 0.0 {
            gain_sum += incoming;
        } else {
            loss_sum -= incoming;
        }
        if outgoing > 0.0 {
            gain_sum -= outgoing;
        } else {
            loss_sum += outgoing;
        }
        out.push(rsi_value(gain_sum, loss_sum, window));
    }

    out
}

fn rsi_value(gain_sum: f64, loss_sum: f64, window: usize) -> f64 {
    let avg_gain = gain_sum / window as f64;
    let avg_loss = loss_sum / window as f64;
    let rs = avg_gain / (avg_loss + EPSILON);
    100.0 - 100.0 / (1.0 + rs)
}
