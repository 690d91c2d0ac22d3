use dbengine::database::query_result::QueryResult;

/// Renders one `QueryResult` to stdout. This is the only place dbshell
/// formats engine output — the engine itself returns structured data.
pub fn print_result(result: &QueryResult) {
    match result {
        QueryResult::Ack(msg) => println!("{}", msg),
        QueryResult::RowsAffected(n) => println!("{} row(s) affected", n),
        QueryResult::Rows { columns, rows } => print_rows(columns, rows),
        QueryResult::TableNames(names) => print_list("Tables", names),
        QueryResult::DatabaseNames(names) => print_list("Databases", names),
        QueryResult::IndexNames(names) => print_list("Indexes", names),
        QueryResult::Describe(attrs) => {
            for a in attrs {
                println!(
                    "{}\t{:?}\tnullable={}\tprimary_key={}\tauto_increment={}",
                    a.name, a.data_type, a.nullable, a.primary_key, a.auto_increment
                );
            }
        }
        QueryResult::Dump(text) => print!("{}", text),
        QueryResult::IndexInfo { attribute, table, size } => {
            println!("index on {}.{}: {} entries", table, attribute, size);
        }
    }
}

fn print_list(label: &str, names: &[String]) {
    println!("{}:", label);
    for n in names {
        println!("  {}", n);
    }
}

fn print_rows(columns: &[String], rows: &[dbengine::model::row::Row]) {
    if columns.is_empty() {
        println!("(0 rows)");
        return;
    }
    println!("{}", columns.join("\t"));
    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string()))
            .collect();
        println!("{}", cells.join("\t"));
    }
}
