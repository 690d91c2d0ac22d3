#[cfg(test)]
mod crud {
    use common::config::EngineConfig;
    use dbengine::database::manager::DatabaseManager;
    use dbengine::database::query_result::QueryResult;
    use dbengine::model::value::Value;
    use dbengine::sql::dispatcher::run_command;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, DatabaseManager) {
        let dir = tempdir().unwrap();
        let mut mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));
        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        run_command(
            &mut mgr,
            "CREATE TABLE Items (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(30) NOT NULL, price FLOAT DEFAULT 0);",
        )
        .unwrap();
        (dir, mgr)
    }

    #[test]
    fn insert_assigns_sequential_autoincrement_ids() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name, price) VALUES ("Widget", 9.5), ("Gadget", 19.0);"#).unwrap();

        let result = run_command(&mut mgr, "SELECT * FROM Items ORDER BY id;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].get("id"), Some(&Value::Int(1)));
                assert_eq!(rows[1].get("id"), Some(&Value::Int(2)));
                assert_eq!(rows[0].get("name"), Some(&Value::Text("Widget".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn select_where_filters_rows() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name, price) VALUES ("Widget", 9.5), ("Gadget", 19.0);"#).unwrap();

        let result = run_command(&mut mgr, "SELECT * FROM Items WHERE price >= 15;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("name"), Some(&Value::Text("Gadget".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn select_limit_caps_the_result_set() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name) VALUES ("A"), ("B"), ("C");"#).unwrap();

        let result = run_command(&mut mgr, "SELECT * FROM Items ORDER BY id LIMIT 2;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => assert_eq!(rows.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn update_with_where_only_touches_matching_rows() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name, price) VALUES ("Widget", 9.5), ("Gadget", 19.0);"#).unwrap();

        let affected = run_command(&mut mgr, "UPDATE Items SET price = 0 WHERE name = \"Widget\";").unwrap();
        assert_eq!(affected, QueryResult::RowsAffected(1));

        let result = run_command(&mut mgr, "SELECT * FROM Items WHERE name = \"Gadget\";").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => assert_eq!(rows[0].get("price"), Some(&Value::Float(19.0))),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn delete_with_where_removes_only_matching_rows() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name) VALUES ("Widget"), ("Gadget");"#).unwrap();

        let affected = run_command(&mut mgr, "DELETE FROM Items WHERE name = \"Widget\";").unwrap();
        assert_eq!(affected, QueryResult::RowsAffected(1));

        let result = run_command(&mut mgr, "SELECT * FROM Items;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("name"), Some(&Value::Text("Gadget".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn inserting_a_duplicate_primary_key_is_rejected() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (id, name) VALUES (1, "Widget");"#).unwrap();
        assert!(run_command(&mut mgr, r#"INSERT INTO Items (id, name) VALUES (1, "Other");"#).is_err());
    }

    #[test]
    fn inserting_without_a_required_not_null_column_fails() {
        let (_dir, mut mgr) = setup();
        assert!(run_command(&mut mgr, "INSERT INTO Items (price) VALUES (5.0);").is_err());
    }

    #[test]
    fn not_in_where_clause_inverts_the_comparison() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Items (name, price) VALUES ("Widget", 9.5), ("Gadget", 19.0);"#).unwrap();

        let result = run_command(&mut mgr, "SELECT * FROM Items WHERE NOT price >= 15;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("name"), Some(&Value::Text("Widget".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
