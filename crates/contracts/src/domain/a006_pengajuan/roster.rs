//! Team roster rules of a permit.
//!
//! The permit holder is always the first row and cannot be removed; an
//! employee appears at most once; rows picked from the employee list carry
//! the employee's master name.

use std::collections::HashSet;

use super::aggregate::AnggotaTim;
use crate::domain::a004_karyawan::aggregate::KaryawanId;
use crate::domain::common::DomainError;

/// Team of a freshly created permit
pub fn initial_team(holder_id: KaryawanId, holder_nama: &str) -> Vec<AnggotaTim> {
    vec![AnggotaTim::for_holder(holder_id, holder_nama)]
}

/// Normalises a submitted team.
///
/// `resolve_name` returns the master name of an employee, or `None` when the
/// employee does not exist.
pub fn normalize_team<F>(
    rows: Vec<AnggotaTim>,
    holder_id: KaryawanId,
    holder_nama: &str,
    resolve_name: F,
) -> Result<Vec<AnggotaTim>, DomainError>
where
    F: Fn(KaryawanId) -> Option<String>,
{
    let mut seen = HashSet::new();
    let mut team = Vec::with_capacity(rows.len() + 1);

    for (idx, mut row) in rows.into_iter().enumerate() {
        match row.karyawan_id {
            Some(id) => {
                if !seen.insert(id) {
                    return Err(DomainError::invalid(format!(
                        "Karyawan {} tercantum lebih dari sekali dalam tim",
                        id
                    )));
                }
                row.nama = resolve_name(id)
                    .ok_or_else(|| DomainError::not_found("Karyawan", id.0))?;
            }
            None => {
                row.nama = row.nama.trim().to_string();
                if row.nama.is_empty() {
                    return Err(DomainError::invalid(format!(
                        "Nama anggota tim pada baris {} tidak boleh kosong",
                        idx + 1
                    )));
                }
            }
        }
        team.push(row);
    }

    match team.iter().position(|r| r.karyawan_id == Some(holder_id)) {
        Some(0) => {}
        Some(pos) => {
            let holder = team.remove(pos);
            team.insert(0, holder);
        }
        None => team.insert(0, AnggotaTim::for_holder(holder_id, holder_nama)),
    }

    Ok(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a006_pengajuan::aggregate::Rekomendasi;

    fn names(id: KaryawanId) -> Option<String> {
        match id.0 {
            1 => Some("Budi Santoso".into()),
            2 => Some("Siti Wijaya".into()),
            3 => Some("Agus Saputra".into()),
            _ => None,
        }
    }

    fn picked(id: i32) -> AnggotaTim {
        AnggotaTim {
            karyawan_id: Some(KaryawanId(id)),
            nama: "stale".into(),
            ..Default::default()
        }
    }

    #[test]
    fn holder_is_added_when_missing() {
        let team = normalize_team(vec![picked(2)], KaryawanId(1), "Budi Santoso", names).unwrap();
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].karyawan_id, Some(KaryawanId(1)));
        assert_eq!(team[0].rekomendasi, Rekomendasi::Ya);
        assert_eq!(team[1].nama, "Siti Wijaya");
    }

    #[test]
    fn holder_is_moved_to_the_top() {
        let team = normalize_team(
            vec![picked(2), picked(3), picked(1)],
            KaryawanId(1),
            "Budi Santoso",
            names,
        )
        .unwrap();
        let order: Vec<_> = team.iter().map(|r| r.karyawan_id.unwrap().0).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = normalize_team(vec![picked(2), picked(2)], KaryawanId(1), "Budi", names);
        assert!(matches!(err, Err(DomainError::Invalid(_))));
    }

    #[test]
    fn unknown_employee_is_not_found() {
        let err = normalize_team(vec![picked(99)], KaryawanId(1), "Budi", names);
        assert_eq!(err, Err(DomainError::not_found("Karyawan", 99)));
    }

    #[test]
    fn manual_rows_need_a_name() {
        let manual = AnggotaTim {
            nama: "  Tamu Vendor ".into(),
            ..Default::default()
        };
        let team = normalize_team(vec![manual], KaryawanId(1), "Budi", names).unwrap();
        assert_eq!(team[1].nama, "Tamu Vendor");

        let nameless = AnggotaTim::default();
        assert!(normalize_team(vec![nameless], KaryawanId(1), "Budi", names).is_err());
    }

    #[test]
    fn initial_team_is_just_the_holder() {
        let team = initial_team(KaryawanId(1), "Budi Santoso");
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].nama, "Budi Santoso");
    }
}
