use super::super::domain::{LearningStyle, Question, QuestionOption};

/// Built-in questionnaire; option labels are listed in V, A, R, K order.
const FALLBACK_BANK: [(u32, &str, [&str; 4]); 16] = [
    (
        1,
        "Ketika Anda mendapat petunjuk arah, Anda lebih suka:",
        [
            "Melihat peta atau diagram",
            "Mendengar penjelasan lisan",
            "Membaca instruksi tertulis langkah demi langkah",
            "Diantar langsung ke tempat tujuan",
        ],
    ),
    (
        2,
        "Ketika belajar materi baru, Anda lebih mudah memahami dengan:",
        [
            "Melihat gambar, diagram, atau video",
            "Mendengarkan penjelasan guru atau podcast",
            "Membaca buku teks atau artikel",
            "Langsung mencoba praktiknya",
        ],
    ),
    (
        3,
        "Saat memilih smartphone baru, Anda akan:",
        [
            "Melihat desain dan tampilannya",
            "Bertanya pendapat teman atau sales",
            "Membaca review dan spesifikasi tertulis",
            "Mencoba langsung di toko",
        ],
    ),
    (
        4,
        "Jika Anda ingin memasak resep baru, Anda akan:",
        [
            "Melihat video tutorial memasak",
            "Mendengarkan instruksi dari seseorang",
            "Membaca resep tertulis dengan detail",
            "Langsung mencoba memasak sambil belajar",
        ],
    ),
    (
        5,
        "Ketika mengingat sesuatu, Anda lebih mudah mengingat:",
        [
            "Wajah dan penampilan orang tersebut",
            "Nama dan suara orang tersebut",
            "Apa yang sudah Anda tulis tentang mereka",
            "Pengalaman yang pernah Anda alami bersama",
        ],
    ),
    (
        6,
        "Saat presentasi, Anda lebih suka menggunakan:",
        [
            "Slide berisi grafik, gambar, dan diagram",
            "Banyak penjelasan lisan tanpa terlalu banyak slide",
            "Handout dengan poin-poin tertulis untuk audiens",
            "Demonstrasi atau contoh langsung",
        ],
    ),
    (
        7,
        "Jika ada masalah teknis pada komputer, Anda akan:",
        [
            "Mencari tutorial dengan screenshot atau video",
            "Menelepon teman atau customer service untuk bertanya",
            "Mencari panduan tertulis atau forum diskusi",
            "Mencoba-coba sendiri sampai berhasil",
        ],
    ),
    (
        8,
        "Saat rapat atau meeting, Anda lebih suka:",
        [
            "Ada presentasi visual atau whiteboard",
            "Diskusi dan brainstorming lisan",
            "Ada agenda dan notulen tertulis",
            "Workshop atau aktivitas hands-on",
        ],
    ),
    (
        9,
        "Ketika menunggu giliran, Anda cenderung:",
        [
            "Melihat-lihat sekeliling atau browsing gambar",
            "Berbicara dengan orang lain atau mendengarkan musik",
            "Membaca buku, artikel, atau media sosial",
            "Bergerak-gerak atau bermain dengan benda di sekitar",
        ],
    ),
    (
        10,
        "Dalam memilih liburan, Anda lebih tertarik dengan:",
        [
            "Tempat dengan pemandangan indah untuk difoto",
            "Tempat dengan musik dan budaya lokal yang menarik",
            "Membaca guidebook dan itinerary detail",
            "Tempat dengan aktivitas petualangan seperti hiking atau diving",
        ],
    ),
    (
        11,
        "Saat belajar bahasa asing, cara yang paling efektif untuk Anda adalah:",
        [
            "Menghafal dengan flashcard atau gambar",
            "Mendengarkan percakapan dan menirukan",
            "Membaca teks dan menulis kosakata",
            "Langsung berbicara dengan penutur asli",
        ],
    ),
    (
        12,
        "Ketika membeli pakaian, yang paling penting bagi Anda adalah:",
        [
            "Tampilan dan warna yang menarik",
            "Rekomendasi dari teman atau sales",
            "Membaca label bahan dan cara perawatan",
            "Kenyamanan saat dipakai",
        ],
    ),
    (
        13,
        "Saat stres atau cemas, Anda cenderung:",
        [
            "Melamun atau membayangkan tempat yang tenang",
            "Berbicara dengan seseorang atau mendengarkan musik",
            "Menulis jurnal atau membuat daftar solusi",
            "Berjalan-jalan atau melakukan aktivitas fisik",
        ],
    ),
    (
        14,
        "Dalam menjelaskan sesuatu kepada orang lain, Anda lebih suka:",
        [
            "Menggambar atau menunjukkan gambar",
            "Menjelaskan dengan kata-kata secara verbal",
            "Menuliskan poin-poin dan memberikan catatan",
            "Memperagakan atau mendemonstrasikan",
        ],
    ),
    (
        15,
        "Ketika mempelajari software atau aplikasi baru, Anda akan:",
        [
            "Melihat video tutorial dengan visual",
            "Meminta seseorang menjelaskan cara menggunakannya",
            "Membaca dokumentasi atau panduan pengguna",
            "Langsung mencoba-coba fiturnya",
        ],
    ),
    (
        16,
        "Saat menghadiri kuliah atau seminar, Anda lebih suka:",
        [
            "Presentasi dengan banyak slide visual",
            "Pembicara yang menarik dan interaktif",
            "Materi handout yang bisa dibaca dan dicatat",
            "Sesi praktik atau workshop langsung",
        ],
    ),
];

/// Question set used whenever the configured source is unavailable or empty.
pub fn fallback_questions() -> Vec<Question> {
    FALLBACK_BANK
        .iter()
        .map(|(id, text, labels)| Question {
            id: *id,
            text: (*text).to_string(),
            options: LearningStyle::ALL
                .into_iter()
                .zip(labels.iter())
                .map(|(style, label)| QuestionOption::new(*label, style))
                .collect(),
            created_at: None,
        })
        .collect()
}
