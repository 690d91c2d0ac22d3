#[cfg(test)]
mod lifecycle {
    use common::config::EngineConfig;
    use dbengine::database::manager::DatabaseManager;
    use dbengine::database::query_result::QueryResult;
    use dbengine::sql::dispatcher::run_command;
    use tempfile::tempdir;

    fn manager() -> (tempfile::TempDir, DatabaseManager) {
        let dir = tempdir().unwrap();
        let mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));
        (dir, mgr)
    }

    #[test]
    fn create_database_then_table_then_drop_table_then_drop_database() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        run_command(&mut mgr, "CREATE TABLE Items (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(30) NOT NULL);").unwrap();

        match run_command(&mut mgr, "SHOW TABLES;").unwrap() {
            QueryResult::TableNames(names) => assert_eq!(names, vec!["Items".to_string()]),
            other => panic!("unexpected: {:?}", other),
        }

        run_command(&mut mgr, "DROP TABLE Items;").unwrap();
        match run_command(&mut mgr, "SHOW TABLES;").unwrap() {
            QueryResult::TableNames(names) => assert!(names.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }

        run_command(&mut mgr, "DROP DATABASE shop;").unwrap();
        assert!(run_command(&mut mgr, "USE shop;").is_err());
    }

    #[test]
    fn dropping_the_active_database_closes_it_and_removes_its_file() {
        let (dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();

        let db_file = dir.path().join("shop.db");
        assert!(db_file.exists());

        run_command(&mut mgr, "DROP DATABASE shop;").unwrap();
        assert!(!db_file.exists());

        match run_command(&mut mgr, "USE shop;") {
            Err(common::err::DbError::DatabaseDoesNotExist(name)) => assert_eq!(name, "shop"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn show_databases_lists_every_created_database() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "CREATE DATABASE warehouse;").unwrap();

        match run_command(&mut mgr, "SHOW DATABASES;").unwrap() {
            QueryResult::DatabaseNames(mut names) => {
                names.sort();
                assert_eq!(names, vec!["shop".to_string(), "warehouse".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn describe_reports_the_declared_schema() {
        let (_dir, mut mgr) = manager();
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        run_command(&mut mgr, "CREATE TABLE Items (id INT PRIMARY KEY, price FLOAT);").unwrap();

        match run_command(&mut mgr, "DESCRIBE Items;").unwrap() {
            QueryResult::Describe(attrs) => {
                assert_eq!(attrs.len(), 2);
                assert!(attrs.iter().any(|a| a.name == "id" && a.primary_key));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
