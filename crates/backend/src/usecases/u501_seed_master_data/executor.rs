use anyhow::Result;
use contracts::domain::a001_perusahaan::aggregate::PerusahaanDto;
use contracts::domain::a002_departemen::aggregate::DepartemenDto;
use contracts::domain::a003_jabatan::aggregate::JabatanDto;
use contracts::domain::a004_karyawan::aggregate::KaryawanDto;
use contracts::domain::a005_jenis_pekerjaan::aggregate::JenisPekerjaanDto;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_seed_master_data::{SeedMasterData, SeedSummary};

use super::catalog::{self, COMPANIES, DEPARTMENTS, EMPLOYEES_PER_POSITION, JOB_TYPES};
use crate::domain::{
    a001_perusahaan, a002_departemen, a003_jabatan, a004_karyawan, a005_jenis_pekerjaan,
};
use crate::shared::logger;

/// Upserts the whole catalog; safe to run repeatedly
pub async fn execute() -> Result<SeedSummary> {
    tracing::info!("{}: start", SeedMasterData::full_name());
    let mut summary = SeedSummary::default();

    for (company_kode, nama, alamat) in COMPANIES {
        let perusahaan_id = a001_perusahaan::service::upsert_by_kode(PerusahaanDto {
            kode: company_kode.to_string(),
            nama: nama.to_string(),
            alamat: Some(alamat.to_string()),
        })
        .await?;
        summary.perusahaan += 1;

        for (dept_index, (dept_kode, dept_nama)) in DEPARTMENTS.iter().enumerate() {
            let dept_code = catalog::department_code(company_kode, dept_kode);
            let departemen_id = a002_departemen::service::upsert_by_kode(DepartemenDto {
                kode: dept_code.clone(),
                nama: dept_nama.to_string(),
                perusahaan_id: Some(perusahaan_id.0),
            })
            .await?;
            summary.departemen += 1;

            for (position_index, position) in catalog::positions_for(dept_kode).iter().enumerate() {
                let jabatan_id = a003_jabatan::service::upsert_by_kode(JabatanDto {
                    kode: catalog::position_code(&dept_code, position),
                    nama: position.to_string(),
                    departemen_id: Some(departemen_id.0),
                })
                .await?;
                summary.jabatan += 1;

                for n in 0..EMPLOYEES_PER_POSITION {
                    let sample = catalog::employee(company_kode, dept_index, position_index, n);
                    a004_karyawan::service::upsert_by_nrp(KaryawanDto {
                        nrp: sample.nrp,
                        nrp_bib: Some(sample.nrp_bib),
                        nama: sample.nama,
                        telepon: Some(sample.telepon),
                        status: Some("ACTIVE".to_string()),
                        departemen_id: Some(departemen_id.0),
                        jabatan_id: Some(jabatan_id.0),
                        tanggal_lahir: Some(sample.tanggal_lahir),
                        tanggal_masuk: Some(sample.tanggal_masuk),
                        tinggi_badan: Some(sample.tinggi_badan),
                        berat_badan: Some(sample.berat_badan),
                    })
                    .await?;
                    summary.karyawan += 1;
                }
            }
        }
        tracing::info!("Seeded company {}", company_kode);
    }

    for (kode, nama) in JOB_TYPES {
        a005_jenis_pekerjaan::service::upsert_by_kode(JenisPekerjaanDto {
            kode: kode.to_string(),
            nama: nama.to_string(),
        })
        .await?;
        summary.jenis_pekerjaan += 1;
    }

    logger::log(
        "seed",
        &format!(
            "Seeded {} perusahaan, {} departemen, {} jabatan, {} karyawan, {} jenis pekerjaan",
            summary.perusahaan,
            summary.departemen,
            summary.jabatan,
            summary.karyawan,
            summary.jenis_pekerjaan
        ),
    );
    tracing::info!("{}: done {:?}", SeedMasterData::full_name(), summary);
    Ok(summary)
}
