use std::fmt::Write as _;

use super::super::domain::{Dominant, LearningStyle, PercentageBreakdown};
use super::super::presentation;

fn prompt_label(dominant: Dominant) -> &'static str {
    match dominant {
        Dominant::Multimodal => "Multimodal (Campuran)",
        other => presentation::label(other),
    }
}

/// Builds the Indonesian study-coach prompt for one scored questionnaire.
pub fn build_prompt(dominant: Dominant, percentages: &PercentageBreakdown) -> String {
    let mut prompt = String::from(
        "Kamu adalah seorang ahli pendidikan dan psikologi belajar. Berdasarkan hasil tes gaya belajar berikut, berikan rekomendasi belajar yang personal dan praktis dalam Bahasa Indonesia.\n\n",
    );

    prompt.push_str("Hasil Tes Gaya Belajar:\n");
    let _ = writeln!(prompt, "- Gaya Belajar Dominan: {}", prompt_label(dominant));
    for style in LearningStyle::ALL {
        let _ = writeln!(
            prompt,
            "- Persentase {}: {}%",
            presentation::label(Dominant::Style(style)),
            percentages.get(style)
        );
    }

    prompt.push_str(
        "\nBerikan rekomendasi dalam format markdown berikut (gunakan emoji untuk setiap section):\n\n\
         ### 🎯 Strategi Belajar Utama\n\
         Berikan 3-4 tips praktis yang sangat spesifik sesuai gaya belajar dominan.\n\n\
         ### 🛠️ Tools & Aplikasi\n\
         Rekomendasikan 3-4 aplikasi/tools yang cocok dengan penjelasan singkat kenapa cocok.\n\n\
         ### 📝 Tips Menghadapi Ujian\n\
         Berikan 2-3 tips spesifik bagaimana menggunakan gaya belajar ini saat ujian.\n\n\
         ### 💡 Kombinasi Gaya Belajar\n\
         Berikan 1-2 saran bagaimana menggabungkan gaya belajar lain untuk hasil maksimal.\n\n\
         Jawab dengan singkat, padat, dan actionable. Gunakan bullet points (-) untuk list items.",
    );

    prompt
}
