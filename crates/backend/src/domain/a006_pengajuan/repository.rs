use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a001_perusahaan::aggregate::PerusahaanId;
use contracts::domain::a002_departemen::aggregate::DepartemenId;
use contracts::domain::a003_jabatan::aggregate::JabatanId;
use contracts::domain::a004_karyawan::aggregate::KaryawanId;
use contracts::domain::a005_jenis_pekerjaan::aggregate::JenisPekerjaanId;
use contracts::domain::a006_pengajuan::aggregate::{AnggotaTim, Pengajuan, PengajuanId, Rekomendasi};
use contracts::domain::a006_pengajuan::status::PengajuanStatus;
use contracts::domain::common::BaseAggregate;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, Statement, TransactionTrait,
};

use crate::shared::data::db::get_connection;
use crate::shared::data::metadata;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a006_pengajuan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tanggal: NaiveDate,
    pub waktu: String,
    pub lokasi_kerja: String,
    pub judul_pekerjaan: String,
    pub nomor_izin_kerja: String,
    pub keterangan: String,
    pub status: String,
    pub departemen_id: i32,
    pub pemegang_ijin_id: i32,
    pub jabatan_id: i32,
    pub perusahaan_id: i32,
    pub jenis_pekerjaan_id: i32,
    pub petugas_pemeriksa_id: Option<i32>,
    pub pengawas_pekerjaan_id: Option<i32>,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Team rows of a permit, kept in roster order
pub mod pemeriksaan_fisik {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "a006_pengajuan_pemeriksaan_fisik")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub pengajuan_id: i32,
        pub urutan: i32,
        pub karyawan_id: Option<i32>,
        pub nama: String,
        pub td: String,
        pub nadi: String,
        pub rr: String,
        pub sao2: String,
        pub suhu: String,
        pub keluhan: String,
        pub rekomendasi: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<pemeriksaan_fisik::Model> for AnggotaTim {
    fn from(m: pemeriksaan_fisik::Model) -> Self {
        AnggotaTim {
            karyawan_id: m.karyawan_id.map(KaryawanId),
            nama: m.nama,
            td: m.td,
            nadi: m.nadi,
            rr: m.rr,
            sao2: m.sao2,
            suhu: m.suhu,
            keluhan: m.keluhan,
            rekomendasi: Rekomendasi::parse(&m.rekomendasi),
        }
    }
}

impl From<Model> for Pengajuan {
    fn from(m: Model) -> Self {
        let status = PengajuanStatus::parse(&m.status).unwrap_or_else(|_| {
            tracing::warn!("Pengajuan {} has unknown status {:?}", m.id, m.status);
            PengajuanStatus::default()
        });
        Pengajuan {
            base: BaseAggregate::with_metadata(
                PengajuanId(m.id),
                metadata::from_columns(m.created_at, m.updated_at, m.is_deleted, m.version),
            ),
            tanggal: m.tanggal,
            waktu: m.waktu,
            lokasi_kerja: m.lokasi_kerja,
            judul_pekerjaan: m.judul_pekerjaan,
            nomor_izin_kerja: m.nomor_izin_kerja,
            keterangan: m.keterangan,
            status,
            departemen_id: DepartemenId(m.departemen_id),
            pemegang_ijin_id: KaryawanId(m.pemegang_ijin_id),
            jabatan_id: JabatanId(m.jabatan_id),
            perusahaan_id: PerusahaanId(m.perusahaan_id),
            jenis_pekerjaan_id: JenisPekerjaanId(m.jenis_pekerjaan_id),
            petugas_pemeriksa_id: m.petugas_pemeriksa_id.map(KaryawanId),
            pengawas_pekerjaan_id: m.pengawas_pekerjaan_id.map(KaryawanId),
            pemeriksaan_fisik: Vec::new(),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Pengajuan) -> ActiveModel {
    let meta = &aggregate.base.metadata;
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        tanggal: Set(aggregate.tanggal),
        waktu: Set(aggregate.waktu.clone()),
        lokasi_kerja: Set(aggregate.lokasi_kerja.clone()),
        judul_pekerjaan: Set(aggregate.judul_pekerjaan.clone()),
        nomor_izin_kerja: Set(aggregate.nomor_izin_kerja.clone()),
        keterangan: Set(aggregate.keterangan.clone()),
        status: Set(aggregate.status.as_str().to_string()),
        departemen_id: Set(aggregate.departemen_id.0),
        pemegang_ijin_id: Set(aggregate.pemegang_ijin_id.0),
        jabatan_id: Set(aggregate.jabatan_id.0),
        perusahaan_id: Set(aggregate.perusahaan_id.0),
        jenis_pekerjaan_id: Set(aggregate.jenis_pekerjaan_id.0),
        petugas_pemeriksa_id: Set(aggregate.petugas_pemeriksa_id.map(|id| id.0)),
        pengawas_pekerjaan_id: Set(aggregate.pengawas_pekerjaan_id.map(|id| id.0)),
        is_deleted: Set(meta.is_deleted),
        created_at: Set(Some(meta.created_at)),
        updated_at: Set(Some(meta.updated_at)),
        version: Set(meta.version),
    }
}

fn team_rows(pengajuan_id: i32, team: &[AnggotaTim]) -> Vec<pemeriksaan_fisik::ActiveModel> {
    team.iter()
        .enumerate()
        .map(|(idx, row)| pemeriksaan_fisik::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            pengajuan_id: Set(pengajuan_id),
            urutan: Set(idx as i32 + 1),
            karyawan_id: Set(row.karyawan_id.map(|id| id.0)),
            nama: Set(row.nama.clone()),
            td: Set(row.td.clone()),
            nadi: Set(row.nadi.clone()),
            rr: Set(row.rr.clone()),
            sao2: Set(row.sao2.clone()),
            suhu: Set(row.suhu.clone()),
            keluhan: Set(row.keluhan.clone()),
            rekomendasi: Set(row.rekomendasi.as_str().to_string()),
        })
        .collect()
}

async fn replace_team<C: ConnectionTrait>(
    db: &C,
    pengajuan_id: i32,
    team: &[AnggotaTim],
) -> anyhow::Result<()> {
    pemeriksaan_fisik::Entity::delete_many()
        .filter(pemeriksaan_fisik::Column::PengajuanId.eq(pengajuan_id))
        .exec(db)
        .await?;
    let rows = team_rows(pengajuan_id, team);
    if !rows.is_empty() {
        pemeriksaan_fisik::Entity::insert_many(rows).exec(db).await?;
    }
    Ok(())
}

/// Headers only, newest first; teams are not loaded
pub async fn list_all() -> anyhow::Result<Vec<Pengajuan>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Header together with its team
pub async fn get_by_id(id: PengajuanId) -> anyhow::Result<Option<Pengajuan>> {
    let Some(model) = Entity::find_by_id(id.0)
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?
    else {
        return Ok(None);
    };

    let mut pengajuan: Pengajuan = model.into();
    pengajuan.pemeriksaan_fisik = pemeriksaan_fisik::Entity::find()
        .filter(pemeriksaan_fisik::Column::PengajuanId.eq(id.0))
        .order_by_asc(pemeriksaan_fisik::Column::Urutan)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Some(pengajuan))
}

pub async fn insert(aggregate: &Pengajuan) -> anyhow::Result<PengajuanId> {
    let txn = conn().begin().await?;
    let model = to_active(aggregate).insert(&txn).await?;
    replace_team(&txn, model.id, &aggregate.pemeriksaan_fisik).await?;
    txn.commit().await?;
    Ok(PengajuanId(model.id))
}

/// Writes the header and replaces the stored team
pub async fn update(aggregate: &Pengajuan) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.id = Set(aggregate.base.id.0);
    active.created_at = sea_orm::ActiveValue::NotSet;

    let txn = conn().begin().await?;
    active.update(&txn).await?;
    replace_team(&txn, aggregate.base.id.0, &aggregate.pemeriksaan_fisik).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn soft_delete(id: PengajuanId) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.0))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn count_by_jenis_pekerjaan(id: JenisPekerjaanId) -> anyhow::Result<u64> {
    let count = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::JenisPekerjaanId.eq(id.0))
        .count(conn())
        .await?;
    Ok(count)
}

/// Live permits naming the employee as holder, examiner, supervisor or team member
pub async fn count_referencing_karyawan(id: KaryawanId) -> anyhow::Result<u64> {
    let row = conn()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS count FROM a006_pengajuan p
             WHERE p.is_deleted = 0
               AND (p.pemegang_ijin_id = ?
                    OR p.petugas_pemeriksa_id = ?
                    OR p.pengawas_pekerjaan_id = ?
                    OR EXISTS (SELECT 1 FROM a006_pengajuan_pemeriksaan_fisik f
                               WHERE f.pengajuan_id = p.id AND f.karyawan_id = ?))",
            [id.0.into(), id.0.into(), id.0.into(), id.0.into()],
        ))
        .await?;

    match row {
        Some(row) => {
            let count: i64 = row.try_get("", "count")?;
            Ok(count as u64)
        }
        None => Ok(0),
    }
}
