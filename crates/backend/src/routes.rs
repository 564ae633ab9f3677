use axum::{
    handler::Handler,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    let require_auth = || middleware::from_fn(system::auth::middleware::require_auth);
    let require_admin = || middleware::from_fn(system::auth::middleware::require_admin);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/",
            get(|| async { Json(json!({ "message": "Server is running!" })) }),
        )
        // ========================================
        // AUTH
        // ========================================
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/auth/me",
            get(system::handlers::auth::current_user).layer(require_auth()),
        )
        // ========================================
        // SETTINGS (admin only)
        // ========================================
        .route(
            "/api/roles",
            get(system::handlers::roles::list_all)
                .post(system::handlers::roles::create)
                .layer(require_admin()),
        )
        .route(
            "/api/roles/:id",
            put(system::handlers::roles::update)
                .delete(system::handlers::roles::delete)
                .layer(require_admin()),
        )
        .route(
            "/api/users",
            get(system::handlers::users::list_all)
                .post(system::handlers::users::create)
                .layer(require_admin()),
        )
        .route(
            "/api/users/:id",
            put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(require_admin()),
        )
        // ========================================
        // MASTER DATA
        // ========================================
        // A001 Perusahaan
        .route(
            "/api/perusahaan",
            get(handlers::a001_perusahaan::list_all).post(handlers::a001_perusahaan::create),
        )
        .route(
            "/api/perusahaan/:id",
            get(handlers::a001_perusahaan::get_by_id)
                .put(handlers::a001_perusahaan::update)
                .delete(handlers::a001_perusahaan::delete),
        )
        // A002 Departemen
        .route(
            "/api/departemen",
            get(handlers::a002_departemen::list).post(handlers::a002_departemen::create),
        )
        .route(
            "/api/departemen/:id",
            get(handlers::a002_departemen::get_by_id)
                .put(handlers::a002_departemen::update)
                .delete(handlers::a002_departemen::delete),
        )
        // A003 Jabatan
        .route(
            "/api/jabatan",
            get(handlers::a003_jabatan::list).post(handlers::a003_jabatan::create),
        )
        .route(
            "/api/jabatan/:id",
            get(handlers::a003_jabatan::get_by_id)
                .put(handlers::a003_jabatan::update)
                .delete(handlers::a003_jabatan::delete),
        )
        // A004 Karyawan
        .route(
            "/api/karyawan",
            get(handlers::a004_karyawan::list).post(handlers::a004_karyawan::create),
        )
        .route(
            "/api/karyawan/:id",
            get(handlers::a004_karyawan::get_by_id)
                .put(handlers::a004_karyawan::update)
                .delete(handlers::a004_karyawan::delete),
        )
        // A005 Jenis pekerjaan
        .route(
            "/api/jenis-pekerjaan",
            get(handlers::a005_jenis_pekerjaan::list_all)
                .post(handlers::a005_jenis_pekerjaan::create),
        )
        .route(
            "/api/jenis-pekerjaan/:id",
            get(handlers::a005_jenis_pekerjaan::get_by_id)
                .put(handlers::a005_jenis_pekerjaan::update)
                .delete(handlers::a005_jenis_pekerjaan::delete),
        )
        // ========================================
        // PENGAJUAN
        // ========================================
        .route(
            "/api/pengajuan",
            get(handlers::a006_pengajuan::list_all).post(handlers::a006_pengajuan::create),
        )
        .route(
            "/api/pengajuan/:id",
            get(handlers::a006_pengajuan::get_by_id)
                .put(handlers::a006_pengajuan::update)
                .delete(handlers::a006_pengajuan::delete),
        )
        .route(
            "/api/pengajuan/:id/evaluate",
            post(handlers::a006_pengajuan::evaluate),
        )
        // A007 Thresholds: reading is public, changing needs a login
        .route(
            "/api/thresholds",
            get(handlers::a007_vitals_threshold::list_all),
        )
        .route(
            "/api/thresholds/:id",
            put(handlers::a007_vitals_threshold::update.layer(require_auth())),
        )
        // ========================================
        // SYSTEM
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
        .route("/api/seed", post(handlers::seed::seed_master_data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_builds_with_auth_layers() {
        let _router: Router = configure_routes();
    }
}
