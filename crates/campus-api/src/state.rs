use campus_db::Database;

/// State handed to every route handler as `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
}
