//! Display metadata keyed by the closed style set.
//!
//! The typed lookups are total over [`Dominant`]; the `*_for_tag` helpers exist for callers that
//! only hold a raw persisted tag.

use serde::Serialize;

use super::domain::{Dominant, LearningStyle, PercentageBreakdown, ScoreTally};

pub const NEUTRAL_COLOR: &str = "hsl(0, 0%, 50%)";

pub fn label(dominant: Dominant) -> &'static str {
    match dominant {
        Dominant::Style(LearningStyle::Visual) => "Visual",
        Dominant::Style(LearningStyle::Auditory) => "Auditory",
        Dominant::Style(LearningStyle::ReadWrite) => "Read/Write",
        Dominant::Style(LearningStyle::Kinesthetic) => "Kinesthetic",
        Dominant::Multimodal => "Multimodal",
    }
}

pub fn color(dominant: Dominant) -> &'static str {
    match dominant {
        Dominant::Style(LearningStyle::Visual) => "hsl(220, 70%, 50%)",
        Dominant::Style(LearningStyle::Auditory) => "hsl(280, 65%, 60%)",
        Dominant::Style(LearningStyle::ReadWrite) => "hsl(35, 85%, 55%)",
        Dominant::Style(LearningStyle::Kinesthetic) => "hsl(160, 60%, 45%)",
        Dominant::Multimodal => NEUTRAL_COLOR,
    }
}

pub fn description(dominant: Dominant) -> &'static str {
    match dominant {
        Dominant::Style(LearningStyle::Visual) => {
            "Anda adalah pembelajar Visual. Anda memahami informasi lebih baik melalui gambar, diagram, dan grafik. Tips: Gunakan mind map, highlighter warna-warni, dan video pembelajaran."
        }
        Dominant::Style(LearningStyle::Auditory) => {
            "Anda adalah pembelajar Auditory. Anda lebih mudah menyerap informasi melalui pendengaran dan diskusi. Tips: Dengarkan podcast, diskusi kelompok, dan rekam materi untuk didengar ulang."
        }
        Dominant::Style(LearningStyle::ReadWrite) => {
            "Anda adalah pembelajar Read/Write. Anda paling mudah memahami informasi melalui teks tertulis, daftar, dan catatan. Tips: Buat ringkasan tertulis, baca ulang catatan, dan ubah diagram menjadi kalimat."
        }
        Dominant::Style(LearningStyle::Kinesthetic) => {
            "Anda adalah pembelajar Kinesthetic. Anda belajar paling efektif melalui praktik langsung dan aktivitas fisik. Tips: Buat proyek, lakukan eksperimen, dan jangan duduk diam saat belajar."
        }
        Dominant::Multimodal => {
            "Anda memiliki gaya belajar Multimodal (Campuran). Anda fleksibel menggunakan berbagai metode belajar. Tips: Kombinasikan berbagai metode sesuai topik yang dipelajari."
        }
    }
}

/// Exact persisted tags only; no trimming or case folding.
fn stored_tag(tag: &str) -> Option<Dominant> {
    match tag {
        "V" => Some(Dominant::Style(LearningStyle::Visual)),
        "A" => Some(Dominant::Style(LearningStyle::Auditory)),
        "R" => Some(Dominant::Style(LearningStyle::ReadWrite)),
        "K" => Some(Dominant::Style(LearningStyle::Kinesthetic)),
        Dominant::MULTIMODAL_TAG => Some(Dominant::Multimodal),
        _ => None,
    }
}

/// Label for a raw tag, echoing the tag back when it is not recognised.
pub fn label_for_tag(tag: &str) -> String {
    match stored_tag(tag) {
        Some(dominant) => label(dominant).to_string(),
        None => tag.to_string(),
    }
}

/// Color for a raw tag, falling back to the neutral grey.
pub fn color_for_tag(tag: &str) -> &'static str {
    stored_tag(tag).map(color).unwrap_or(NEUTRAL_COLOR)
}

/// One row of a score breakdown, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct StyleBreakdownEntry {
    pub style: LearningStyle,
    pub label: &'static str,
    pub color: &'static str,
    pub score: u32,
    pub percentage: u8,
}

pub fn breakdown(
    raw_scores: &ScoreTally,
    percentages: &PercentageBreakdown,
) -> Vec<StyleBreakdownEntry> {
    LearningStyle::ALL
        .into_iter()
        .map(|style| StyleBreakdownEntry {
            style,
            label: label(Dominant::Style(style)),
            color: color(Dominant::Style(style)),
            score: *raw_scores.get(style),
            percentage: *percentages.get(style),
        })
        .collect()
}
