//! Built-in sample messages for the runners

use crate::edge_cases::EdgeCaseCategory;
use scamguard_core::Label;

/// Scam messages drawn by the stream simulator
pub const STREAM_SCAM_MESSAGES: &[&str] = &[
    "SELAMAT! Anda menang 100 juta! Transfer admin 500rb",
    "URGENT! Bank account will be blocked. Click here now!",
    "Investasi 1 juta jadi 10 juta! Guaranteed profit!",
    "FREE iPhone 15! Pay shipping $50 only!",
    "Pinjaman cepat cair! Bunga 0%! Tanpa survei!",
];

/// Legitimate messages drawn by the stream simulator
pub const STREAM_LEGIT_MESSAGES: &[&str] = &[
    "Meeting reminder: Tomorrow at 2 PM",
    "Your package has been delivered successfully",
    "Invoice #12345 sent. Please review and confirm",
    "Thank you for your order. Tracking: JNE123456",
    "Project deadline extended to next week",
];

/// Message used for stress batches
pub fn stress_message(index: usize) -> String {
    format!(
        "Test message {}: This is a sample text for stress testing the system",
        index
    )
}

fn category(name: &str, messages: &[&str]) -> EdgeCaseCategory {
    EdgeCaseCategory::new(name, messages.iter().map(|m| m.to_string()).collect())
}

/// Boundary conditions with no agreed ground truth
pub fn edge_case_suite() -> Vec<EdgeCaseCategory> {
    vec![
        category(
            "Ambiguous - Mixed Signals",
            &[
                "Hai, mau investasi? Modal kecil untung besar. Tapi legit kok, bukan scam",
                "Meeting urgent besok! Jangan lupa transfer biaya parkir 50rb dulu ya",
            ],
        ),
        category("Very Short Messages", &["Menang!", "Urgent!", "Thanks", "OK"]),
        category(
            "Very Long Messages",
            &["Selamat pagi, saya ingin menginformasikan bahwa paket Anda telah sampai di kantor pos cabang terdekat. Mohon untuk segera mengambil paket tersebut dengan membawa KTP asli dan nomor resi pengiriman. Kantor pos buka dari jam 8 pagi hingga 4 sore setiap hari kerja. Terima kasih atas perhatiannya."],
        ),
        category(
            "Multiple Languages",
            &[
                "Hello! Anda menang lottery! Please transfer fee $100 untuk claim prize!",
                "Selamat! You won the jackpot! Hubungi 08123456789 now!",
            ],
        ),
        category(
            "Numbers and URLs",
            &[
                "Transfer ke 1234567890 nominal Rp 5.000.000 untuk aktivasi",
                "Klik http://bit.ly/12345 untuk verifikasi akun Anda",
                "Download app di https://play.google.com/store/apps",
            ],
        ),
        category(
            "ALL CAPS vs lowercase",
            &[
                "URGENT URGENT URGENT TRANSFER NOW!!!",
                "urgent please transfer money now",
            ],
        ),
        category(
            "Legitimate but Urgent",
            &[
                "URGENT: Meeting moved to 10 AM. Please confirm ASAP!",
                "IMPORTANT: Project deadline today! Submit now!",
            ],
        ),
    ]
}

/// Known scam types and legitimate traffic, each with its expected label
pub fn labeled_test_suite() -> Vec<EdgeCaseCategory> {
    vec![
        category(
            "Fake Lottery",
            &[
                "SELAMAT! Anda menang undian Rp 100 juta! Transfer admin 500rb ke 08123456789",
                "Congratulations! You won $1,000,000! Send processing fee $100 now!",
                "ANDA PEMENANG! Hadiah 50 juta menanti! Hubungi 08123456789 segera!",
            ],
        )
        .expecting(Label::Scam),
        category(
            "Phishing Banking",
            &[
                "URGENT! Akun BCA Anda akan diblokir. Verifikasi di http://fake-bca.com sekarang",
                "Your account has been compromised. Reset password: http://fake-bank.com",
                "Mandiri Alert: Transaksi mencurigakan. Konfirmasi segera atau diblokir!",
            ],
        )
        .expecting(Label::Scam),
        category(
            "Investment Scam",
            &[
                "Investasi modal 1 juta jadi 10 juta dalam sebulan! DIJAMIN! WA 08123456789",
                "CRYPTOCURRENCY! 1000% return guaranteed! Limited slots available!",
                "Trading forex profit 200% per hari! Modal 500rb jadi 10jt! Terbukti!",
            ],
        )
        .expecting(Label::Scam),
        category(
            "Illegal Online Loan",
            &[
                "Pinjaman 20 juta cair hari ini! Tanpa jaminan! KTP saja! Call 08111222333",
                "DANA DARURAT! Bunga 0%! Approved dalam 1 jam! Transfer admin 300rb",
            ],
        )
        .expecting(Label::Scam),
        category(
            "Legitimate - Business Communication",
            &[
                "Meeting besok jam 2 siang. Jangan lupa bawa laptop dan dokumen proposal",
                "Invoice bulan ini sudah saya kirim via email. Mohon dicek dan konfirmasi",
                "Report sudah selesai. Saya upload di Google Drive. Link sudah dikirim",
            ],
        )
        .expecting(Label::Legitimate),
        category(
            "Legitimate - Personal Communication",
            &[
                "Hai, kapan bisa ketemu? Mau diskusi project bareng kamu minggu depan",
                "Terima kasih sudah datang ke acara kemarin. Senang bisa bertemu!",
                "Selamat ulang tahun! Semoga panjang umur dan sehat selalu",
            ],
        )
        .expecting(Label::Legitimate),
        category(
            "Legitimate - Notifications",
            &[
                "Paket Anda sudah sampai di kantor pos. Silakan ambil dengan bawa KTP",
                "Reminder: Deadline tugas besar tanggal 15 Desember. Jangan telat ya!",
                "Jadwal training minggu depan Senin-Rabu. Lokasi di kantor pusat",
            ],
        )
        .expecting(Label::Legitimate),
    ]
}

/// Multi-message conversations; a scenario is a scam attempt when any of
/// its messages is flagged
pub fn real_world_scenarios() -> Vec<EdgeCaseCategory> {
    vec![
        category(
            "Suspicious Lottery Win",
            &[
                "SELAMAT! Anda menang undian BCA senilai Rp 50.000.000",
                "Untuk klaim hadiah, transfer biaya admin Rp 500.000 ke rekening 1234567890",
                "Hubungi customer service kami di 08123456789 untuk proses lebih lanjut",
            ],
        ),
        category(
            "Normal Business Communication",
            &[
                "Halo, saya dari PT ABC ingin konfirmasi jadwal meeting besok",
                "Agenda: Presentasi proposal kerjasama, jam 14.00 WIB",
                "Mohon konfirmasi kehadiran Anda. Terima kasih",
            ],
        ),
        category(
            "Phishing Attempt",
            &[
                "URGENT! Akun Anda terdeteksi login dari lokasi tidak dikenal",
                "Segera verifikasi akun Anda di link berikut: http://fake-verification.com",
                "Jika tidak diverifikasi dalam 24 jam, akun akan diblokir permanen",
            ],
        ),
    ]
}
