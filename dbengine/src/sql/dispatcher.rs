use common::err::DbResult;
use tracing::debug;

use crate::database::manager::DatabaseManager;
use crate::database::query_result::QueryResult;
use crate::sql::parser::parse_statement;
use crate::sql::tokenizer::tokenize;

/// Runs one command's source text end to end: tokenize, parse, execute
/// against `manager`'s currently selected database (§6.2, §9 DESIGN NOTES).
/// This is the single entry point `dbshell` drives.
pub fn run_command(manager: &mut DatabaseManager, command: &str) -> DbResult<QueryResult> {
    let tokens = tokenize(command)?;
    let statement = parse_statement(&tokens)?;
    debug!(?statement, "executing statement");
    manager.execute(statement)
}

#[cfg(test)]
mod test {
    use super::*;
    use common::config::EngineConfig;
    use tempfile::tempdir;

    #[test]
    fn runs_a_full_command_sequence() {
        let dir = tempdir().unwrap();
        let mut mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));

        run_command(&mut mgr, "CREATE DATABASE shop;").unwrap();
        run_command(&mut mgr, "USE shop;").unwrap();
        run_command(&mut mgr, "CREATE TABLE Items (id INT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(20) NOT NULL);").unwrap();
        run_command(&mut mgr, r#"INSERT INTO Items (name) VALUES ("Widget");"#).unwrap();

        let result = run_command(&mut mgr, "SELECT * FROM Items;").unwrap();
        match result {
            QueryResult::Rows { rows, .. } => assert_eq!(rows.len(), 1),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage_input() {
        let dir = tempdir().unwrap();
        let mut mgr = DatabaseManager::new(EngineConfig::new(dir.path().to_str().unwrap().to_string()));
        assert!(run_command(&mut mgr, "NOT SQL AT ALL").is_err());
    }
}
