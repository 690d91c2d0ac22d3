#[cfg(test)]
mod joins {
    use common::config::EngineConfig;
    use dbengine::database::manager::DatabaseManager;
    use dbengine::database::query_result::QueryResult;
    use dbengine::model::value::Value;
    use dbengine::sql::dispatcher::run_command;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, DatabaseManager) {
        let dir = tempdir().unwrap();
        let mut mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));
        run_command(&mut mgr, "CREATE DATABASE library;").unwrap();
        run_command(&mut mgr, "USE library;").unwrap();
        run_command(&mut mgr, "CREATE TABLE Authors (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(30) NOT NULL);").unwrap();
        run_command(
            &mut mgr,
            "CREATE TABLE Books (id INT PRIMARY KEY AUTO_INCREMENT, title VARCHAR(50) NOT NULL, author_id INT NOT NULL);",
        )
        .unwrap();
        run_command(&mut mgr, r#"INSERT INTO Authors (name) VALUES ("Ada"), ("Grace");"#).unwrap();
        run_command(&mut mgr, r#"INSERT INTO Books (title, author_id) VALUES ("Notes on Engines", 1);"#).unwrap();
        (dir, mgr)
    }

    #[test]
    fn left_join_keeps_authors_without_any_books() {
        let (_dir, mut mgr) = setup();
        let result = run_command(
            &mut mgr,
            "SELECT name, title FROM Authors LEFT JOIN Books ON Authors.id = Books.author_id;",
        )
        .unwrap();

        match result {
            QueryResult::Rows { rows, .. } => {
                assert_eq!(rows.len(), 2);
                let grace = rows.iter().find(|r| r.get("name") == Some(&Value::Text("Grace".to_string()))).unwrap();
                assert_eq!(grace.get("title"), Some(&Value::Text("NULL".to_string())));
                let ada = rows.iter().find(|r| r.get("name") == Some(&Value::Text("Ada".to_string()))).unwrap();
                assert_eq!(ada.get("title"), Some(&Value::Text("Notes on Engines".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn right_join_keeps_books_without_a_matching_author() {
        let (_dir, mut mgr) = setup();
        run_command(&mut mgr, r#"INSERT INTO Books (title, author_id) VALUES ("Orphan Volume", 99);"#).unwrap();

        let result = run_command(
            &mut mgr,
            "SELECT title, name FROM Authors RIGHT JOIN Books ON Authors.id = Books.author_id;",
        )
        .unwrap();

        match result {
            QueryResult::Rows { rows, .. } => {
                let orphan = rows.iter().find(|r| r.get("title") == Some(&Value::Text("Orphan Volume".to_string()))).unwrap();
                assert_eq!(orphan.get("name"), Some(&Value::Text("NULL".to_string())));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
