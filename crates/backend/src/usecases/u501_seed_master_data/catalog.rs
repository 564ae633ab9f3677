//! Fixed sample data. Every generated code and NRP depends only on the
//! position of the row in the catalog, so repeated runs upsert the same rows.

use chrono::NaiveDate;

/// (kode, nama, alamat)
pub const COMPANIES: &[(&str, &str, &str)] = &[
    ("PPA", "PT. Putra Perkasa Abadi", "Jakarta"),
    ("PAMA", "PT. Pamapersada Nusantara", "Jakarta"),
    ("ABB", "PT. Antareja Mahada Makmur", "Jakarta"),
    ("WSKT", "PT. Waskita Karya (Persero) Tbk", "Jakarta"),
    ("WIKA", "PT. Wijaya Karya (Persero) Tbk", "Jakarta"),
    ("ADHI", "PT. Adhi Karya (Persero) Tbk", "Jakarta"),
    ("PTPP", "PT. PP (Persero) Tbk", "Jakarta"),
    ("HK", "PT. Hutama Karya (Persero)", "Jakarta"),
    ("NK", "PT. Nindya Karya (Persero)", "Jakarta"),
    ("BA", "PT. Brantas Abipraya (Persero)", "Jakarta"),
    ("TOTAL", "PT. Total Bangun Persada Tbk", "Jakarta"),
    ("ACSET", "PT. Acset Indonusa Tbk", "Jakarta"),
    ("JAKON", "PT. Jaya Konstruksi Manggala Pratama Tbk", "Jakarta"),
];

/// (kode suffix, nama), created in every company
pub const DEPARTMENTS: &[(&str, &str)] = &[
    ("OPS", "Operation"),
    ("ENG", "Engineering"),
    ("PLT", "Plant"),
    ("HSE", "Health Safety Environment"),
    ("HRGA", "HR & GA"),
    ("SCM", "Supply Chain Management"),
];

/// High-risk job types
pub const JOB_TYPES: &[(&str, &str)] = &[
    ("WAH", "Bekerja di Ketinggian (Working at Height)"),
    ("CSE", "Bekerja di Ruang Terbatas (Confined Space Entry)"),
    ("HAZ", "Bekerja dengan Bahan Kimia Berbahaya (Hazmat)"),
    ("WAW", "Bekerja di Dekat Air (Working around Water)"),
    ("HOT", "Pekerjaan Panas (Hot Work - Las/Gerinda)"),
    ("HV", "Kelistrikan Tegangan Tinggi (High Voltage)"),
    ("LIFT", "Pengoperasian Alat Berat & Lifting (Crane/Rigging)"),
    ("EXC", "Pekerjaan Penggalian Dalam (Excavation)"),
    ("RAD", "Pekerjaan dengan Paparan Radiasi"),
    ("B3", "Penanganan Limbah B3"),
];

pub const EMPLOYEES_PER_POSITION: usize = 3;

const FIRST_NAMES: &[&str] = &[
    "Budi", "Siti", "Agus", "Dewi", "Eko", "Rina", "Dedi", "Lina", "Hendra", "Sari", "Joko",
    "Maya", "Rudi", "Wulan", "Tono",
];

const LAST_NAMES: &[&str] = &[
    "Santoso", "Wijaya", "Saputra", "Lestari", "Kusuma", "Pratama", "Hidayat", "Mulyani",
    "Setiawan", "Utami", "Nugroho", "Handayani", "Purnomo", "Rahmawati", "Susanto",
];

pub fn positions_for(dept_kode: &str) -> &'static [&'static str] {
    match dept_kode {
        "OPS" => &["Operator", "Foreman", "Supervisor", "Superintendent", "Pit Control"],
        "ENG" => &["Surveyor", "Mine Plan Engineer", "Geologist", "Drill & Blast Eng"],
        "PLT" => &["Mechanic", "Electrician", "Planner", "Inspector"],
        "HSE" => &["Safety Officer", "Medic", "Paramedic", "Enviro Officer"],
        _ => &["Staff", "Section Head", "Dept Head"],
    }
}

pub fn department_code(company_kode: &str, dept_kode: &str) -> String {
    format!("{}-{}", company_kode, dept_kode)
}

/// `PPA-OPS` + `Pit Control` -> `PPA-OPS-PITCONTROL`
pub fn position_code(department_code: &str, position: &str) -> String {
    let compact: String = position
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    format!("{}-{}", department_code, compact)
}

/// Generated employee of one position slot
#[derive(Debug, Clone, PartialEq)]
pub struct SampleEmployee {
    pub nrp: String,
    pub nrp_bib: String,
    pub nama: String,
    pub telepon: String,
    pub tinggi_badan: f64,
    pub berat_badan: f64,
    pub tanggal_lahir: NaiveDate,
    pub tanggal_masuk: NaiveDate,
}

/// Employee number `n` of the position at (`dept_index`, `position_index`) in a company
pub fn employee(
    company_kode: &str,
    dept_index: usize,
    position_index: usize,
    n: usize,
) -> SampleEmployee {
    let slot = (dept_index * 10 + position_index) * EMPLOYEES_PER_POSITION + n;
    let company_offset: usize = company_kode.bytes().map(usize::from).sum();
    let seed = slot * 7 + company_offset;

    let nrp = format!("{}{:08}", company_kode, 10_000_000 + slot);
    SampleEmployee {
        nrp_bib: format!("BIB-{}", nrp),
        nama: format!(
            "{} {}",
            FIRST_NAMES[seed % FIRST_NAMES.len()],
            LAST_NAMES[(seed / FIRST_NAMES.len() + n) % LAST_NAMES.len()]
        ),
        telepon: format!("08{:010}", 1_000_000_000 + (seed as u64 * 7919) % 9_000_000_000),
        tinggi_badan: (155 + seed % 31) as f64,
        berat_badan: (50 + seed % 41) as f64,
        tanggal_lahir: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        tanggal_masuk: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        nrp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_follow_company_and_department() {
        let dept = department_code("PPA", "OPS");
        assert_eq!(dept, "PPA-OPS");
        assert_eq!(position_code(&dept, "Pit Control"), "PPA-OPS-PITCONTROL");
        assert_eq!(position_code(&dept, "Drill & Blast Eng"), "PPA-OPS-DRILL&BLASTENG");
    }

    #[test]
    fn unknown_department_kind_gets_office_positions() {
        assert_eq!(positions_for("HRGA"), &["Staff", "Section Head", "Dept Head"]);
        assert_eq!(positions_for("OPS").len(), 5);
    }

    #[test]
    fn employees_are_deterministic() {
        assert_eq!(employee("PPA", 1, 2, 0), employee("PPA", 1, 2, 0));
        assert_eq!(employee("PPA", 0, 0, 0).nrp, "PPA10000000");
        assert_eq!(employee("PPA", 0, 0, 0).nrp_bib, "BIB-PPA10000000");
    }

    #[test]
    fn every_generated_nrp_is_unique() {
        let mut seen = HashSet::new();
        for (company, _, _) in COMPANIES {
            for (d, (dept, _)) in DEPARTMENTS.iter().enumerate() {
                for p in 0..positions_for(dept).len() {
                    for n in 0..EMPLOYEES_PER_POSITION {
                        assert!(seen.insert(employee(company, d, p, n).nrp));
                    }
                }
            }
        }
        assert_eq!(seen.len(), 13 * 23 * EMPLOYEES_PER_POSITION);
    }

    #[test]
    fn body_measurements_stay_in_sample_range() {
        for n in 0..EMPLOYEES_PER_POSITION {
            let e = employee("WIKA", 3, 1, n);
            assert!((155.0..=185.0).contains(&e.tinggi_badan));
            assert!((50.0..=90.0).contains(&e.berat_badan));
            assert_eq!(e.telepon.len(), 12);
        }
    }
}
