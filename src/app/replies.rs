//! Fixed user-visible strings and report rendering.
//!
//! Every failure the dispatcher can hit maps to one short, apologetic
//! line here; internal error detail never reaches the chat surface.

use crate::domain::signal::{Momentum, SignalReport, Trend};

pub const EMPTY_QUESTION: &str = "Pertanyaannya mana, bro? 😅";
pub const ACCESS_DENIED: &str =
    "Maaf, bot ini belum diaktifkan untuk grup ini. Hubungi admin Coinvestasi ya!";
pub const QUOTA_EXCEEDED: &str =
    "Kuota pertanyaan grup ini sudah habis. Tunggu reset dari admin ya! 🙏";
pub const COMPLETION_FAILED: &str = "Lagi error, coba lagi nanti ya! 😓";
pub const UNKNOWN_SYMBOL: &str =
    "Simbolnya nggak ketemu, bro. Coba yang umum kayak BTCUSDT atau ETHUSDT.";
pub const DATA_UNAVAILABLE: &str =
    "Data pasarnya lagi nggak bisa diambil, coba lagi nanti ya! 😓";
pub const INSUFFICIENT_DATA: &str =
    "Riwayat harganya belum cukup buat dianalisis. Coba lagi besok ya!";
pub const MISSING_SYMBOL: &str = "Mau analisis koin apa? Contoh: /sinyal BTCUSDT";

const DISCLAIMER: &str =
    "⚠️ Bukan saran keuangan. Sinyal ini cuma analisis teknikal otomatis, DYOR!";

/// Render a signal report into the chat reply.
#[must_use]
pub fn render_report(symbol: &str, report: &SignalReport) -> String {
    let trend = match report.trend {
        Trend::Bullish => "Bullish 📈",
        Trend::Bearish => "Bearish 📉",
    };
    let momentum = match report.momentum {
        Momentum::Oversold => "jenuh jual (oversold)",
        Momentum::Neutral => "netral",
        Momentum::Overbought => "jenuh beli (overbought)",
    };
    let volume = if report.volume_spike {
        "ada lonjakan volume 🔥"
    } else {
        "volume normal"
    };
    let candle = if report.inside_bar {
        "\nCandle: inside bar, pasar lagi nunggu arah."
    } else {
        ""
    };

    format!(
        "📊 Sinyal {symbol}\n\
         Tren: {trend} (EMA9 {:.2} / EMA21 {:.2})\n\
         RSI-14: {:.1} — {momentum}\n\
         Volume: {volume} (z-score {:.2})\n\
         Support: {:.2} | Resistance: {:.2}\n\
         Peluang breakout: {:.0}%{candle}\n\
         Entry: {:.2} | Stop: {:.2}\n\
         Target: {:.2} / {:.2}\n\n\
         {DISCLAIMER}",
        report.ema_fast,
        report.ema_slow,
        report.rsi,
        report.volume_zscore,
        report.support,
        report.resistance,
        report.breakout_pct,
        report.entry,
        report.stop,
        report.target1,
        report.target2,
    )
}
