#[cfg(test)]
mod errors {
    use common::config::EngineConfig;
    use common::err::DbError;
    use dbengine::database::manager::DatabaseManager;
    use dbengine::sql::dispatcher::run_command;
    use tempfile::tempdir;

    fn manager() -> (tempfile::TempDir, DatabaseManager) {
        let dir = tempdir().unwrap();
        let mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));
        (dir, mgr)
    }

    #[test]
    fn selecting_before_any_database_is_in_use_is_rejected() {
        let (_dir, mut mgr) = manager();
        let err = run_command(&mut mgr, "SELECT * FROM Items;").unwrap_err();
        assert_eq!(err, DbError::NoDatabaseInUse);
    }

    #[test]
    fn selecting_from_an_unknown_table_is_rejected() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        let err = run_command(&mut mgr, "SELECT * FROM Ghost;").unwrap_err();
        assert!(matches!(err, DbError::UnknownTable(_)));
    }

    #[test]
    fn garbled_sql_is_a_parse_error_not_a_panic() {
        let (_dir, mut mgr) = manager();
        assert!(run_command(&mut mgr, "SELEKT * FORM Items").is_err());
        assert!(run_command(&mut mgr, "CREATE TABLE (id INT);").is_err());
    }

    #[test]
    fn creating_a_table_that_already_exists_is_rejected() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        run_command(&mut mgr, "CREATE TABLE Items (id INT PRIMARY KEY);").unwrap();
        let err = run_command(&mut mgr, "CREATE TABLE Items (id INT PRIMARY KEY);").unwrap_err();
        assert!(matches!(err, DbError::TableExists(_)));
    }

    #[test]
    fn creating_a_table_without_a_primary_key_is_rejected() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        let err = run_command(&mut mgr, "CREATE TABLE Items (name VARCHAR(10));").unwrap_err();
        assert!(matches!(err, DbError::PrimaryKeyRequired(_)));
    }
}
