use common::err::{DbError, DbResult};

use crate::filter::comparator::Comparator;
use crate::filter::expression::Expression;
use crate::filter::logical_op::LogicalOp;
use crate::filter::operand::Operand;
use crate::filter::where_clause::WhereClause;
use crate::join::join_type::JoinType;
use crate::model::data_type::DataType;
use crate::model::value::Value;
use crate::sql::select_query::{JoinClause, SelectColumns, SelectQuery};
use crate::sql::statement::{ColumnDef, Statement};
use crate::sql::token::Token;

/// Recursive-descent parser over one statement's already-tokenized text.
/// The entry point (`parse_statement`) is effectively the keyword-tuple
/// dispatch table the DESIGN NOTES call for: it inspects the leading word
/// (or two) and delegates to one parse function per statement kind.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_word(&self) -> Option<&str> {
        self.peek().and_then(Token::as_word)
    }

    fn at_word(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_word(word))
    }

    fn advance(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect_word(&mut self, word: &str) -> DbResult<()> {
        match self.advance() {
            Some(t) if t.is_word(word) => Ok(()),
            Some(t) => Err(DbError::KeywordExpected(format!("expected {}, found {:?}", word, t))),
            None => Err(DbError::KeywordExpected(word.to_string())),
        }
    }

    fn expect_operator(&mut self, op: &str) -> DbResult<()> {
        match self.advance() {
            Some(t) if t.is_operator(op) => Ok(()),
            Some(t) => Err(DbError::PunctuationExpected(format!("expected {}, found {:?}", op, t))),
            None => Err(DbError::PunctuationExpected(op.to_string())),
        }
    }

    fn try_consume_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn try_consume_operator(&mut self, op: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_operator(op)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_identifier(&mut self) -> DbResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s.clone()),
            Some(t) => Err(DbError::IdentifierExpected(format!("{:?}", t))),
            None => Err(DbError::IdentifierExpected("end of input".to_string())),
        }
    }

    /// Consumes `table.column` or a bare `column`, returning only the
    /// (unqualified) column name — this engine keys rows by attribute name
    /// alone.
    fn parse_qualified_column(&mut self) -> DbResult<String> {
        let first = self.parse_identifier()?;
        if self.try_consume_operator(".") {
            self.parse_identifier()
        } else {
            Ok(first)
        }
    }

    fn parse_literal(&mut self) -> DbResult<Value> {
        match self.advance() {
            Some(Token::IntLiteral(i)) => Ok(Value::Int(*i)),
            Some(Token::FloatLiteral(f)) => Ok(Value::Float(*f)),
            Some(Token::StringLiteral(s)) => Ok(Value::Text(s.clone())),
            Some(Token::Identifier(s)) if s.eq_ignore_ascii_case("TRUE") => Ok(Value::Bool(true)),
            Some(Token::Identifier(s)) if s.eq_ignore_ascii_case("FALSE") => Ok(Value::Bool(false)),
            Some(Token::Identifier(s)) if s.eq_ignore_ascii_case("NULL") => Ok(Value::Text("NULL".to_string())),
            Some(t) => Err(DbError::ValueExpected(format!("{:?}", t))),
            None => Err(DbError::ValueExpected("end of input".to_string())),
        }
    }

    fn parse_operand(&mut self) -> DbResult<Operand> {
        match self.peek() {
            Some(Token::Identifier(s)) if !s.eq_ignore_ascii_case("TRUE") && !s.eq_ignore_ascii_case("FALSE") && !s.eq_ignore_ascii_case("NULL") => {
                Ok(Operand::Reference(self.parse_qualified_column()?))
            }
            _ => Ok(Operand::Literal(self.parse_literal()?)),
        }
    }

    fn parse_comparator(&mut self) -> DbResult<Comparator> {
        match self.advance() {
            Some(Token::Operator(op)) => Comparator::from_token(op),
            Some(t) => Err(DbError::OperatorExpected(format!("{:?}", t))),
            None => Err(DbError::OperatorExpected("end of input".to_string())),
        }
    }

    /// Parses a full WHERE tree: `NOT`* comparison (`AND`|`OR` `NOT`*
    /// comparison)* (§4.7).
    fn parse_where_clause(&mut self) -> DbResult<WhereClause> {
        let mut expressions = Vec::new();
        let mut logical_ops = Vec::new();

        loop {
            let mut not_count = 0u32;
            while self.try_consume_word("NOT") {
                not_count += 1;
            }
            let lhs = self.parse_operand()?;
            let mut comparator = self.parse_comparator()?;
            let rhs = self.parse_operand()?;
            if not_count % 2 == 1 {
                comparator = comparator.inverted();
            }
            expressions.push(Expression::new(lhs, comparator, rhs));

            if self.try_consume_word("AND") {
                logical_ops.push(LogicalOp::And);
            } else if self.try_consume_word("OR") {
                logical_ops.push(LogicalOp::Or);
            } else {
                break;
            }
        }

        Ok(WhereClause { expressions, logical_ops })
    }

    fn parse_data_type(&mut self) -> DbResult<(DataType, usize)> {
        let word = self.parse_identifier()?;
        let dt = DataType::from_keyword(&word)?;
        let mut size = 0usize;
        if dt == DataType::Varchar && self.try_consume_operator("(") {
            match self.advance() {
                Some(Token::IntLiteral(n)) => size = *n as usize,
                other => return Err(DbError::ValueExpected(format!("{:?}", other))),
            }
            self.expect_operator(")")?;
        }
        Ok((dt, size))
    }

    fn parse_create_database(&mut self) -> DbResult<Statement> {
        self.expect_word("DATABASE")?;
        let name = self.parse_identifier()?;
        Ok(Statement::CreateDatabase { name })
    }

    fn parse_drop(&mut self) -> DbResult<Statement> {
        if self.try_consume_word("DATABASE") {
            Ok(Statement::DropDatabase { name: self.parse_identifier()? })
        } else if self.try_consume_word("TABLE") {
            Ok(Statement::DropTable { name: self.parse_identifier()? })
        } else {
            Err(DbError::UnexpectedKeyword("expected DATABASE or TABLE after DROP".to_string()))
        }
    }

    fn parse_use(&mut self) -> DbResult<Statement> {
        Ok(Statement::UseDatabase { name: self.parse_identifier()? })
    }

    fn parse_show(&mut self) -> DbResult<Statement> {
        if self.try_consume_word("DATABASES") {
            Ok(Statement::ShowDatabases)
        } else if self.try_consume_word("TABLES") {
            Ok(Statement::ShowTables)
        } else if self.try_consume_word("INDEXES") {
            Ok(Statement::ShowIndexes)
        } else if self.try_consume_word("INDEX") {
            let attribute = self.parse_identifier()?;
            self.expect_word("FROM")?;
            let table = self.parse_identifier()?;
            Ok(Statement::ShowIndex { attribute, table })
        } else {
            Err(DbError::UnexpectedKeyword(
                "expected DATABASES, TABLES, INDEXES or INDEX after SHOW".to_string(),
            ))
        }
    }

    fn parse_dump(&mut self) -> DbResult<Statement> {
        self.expect_word("DATABASE")?;
        Ok(Statement::DumpDatabase { name: self.parse_identifier()? })
    }

    fn parse_describe(&mut self) -> DbResult<Statement> {
        Ok(Statement::Describe { name: self.parse_identifier()? })
    }

    fn parse_create_table(&mut self) -> DbResult<Statement> {
        self.expect_word("TABLE")?;
        let name = self.parse_identifier()?;
        self.expect_operator("(")?;

        let mut columns = Vec::new();
        loop {
            let col_name = self.parse_identifier()?;
            let (data_type, size) = self.parse_data_type()?;
            let mut not_null = false;
            let mut auto_increment = false;
            let mut primary_key = false;
            let mut default = None;

            loop {
                if self.try_consume_word("NOT") {
                    self.expect_word("NULL")?;
                    not_null = true;
                } else if self.try_consume_word("AUTO_INCREMENT") {
                    auto_increment = true;
                } else if self.try_consume_word("PRIMARY") {
                    self.expect_word("KEY")?;
                    primary_key = true;
                } else if self.try_consume_word("DEFAULT") {
                    default = Some(self.parse_literal()?);
                } else {
                    break;
                }
            }

            columns.push(ColumnDef {
                name: col_name,
                data_type,
                size,
                not_null,
                auto_increment,
                primary_key,
                default,
            });

            if self.try_consume_operator(",") {
                continue;
            }
            break;
        }
        self.expect_operator(")")?;
        Ok(Statement::CreateTable { name, columns })
    }

    fn parse_insert(&mut self) -> DbResult<Statement> {
        self.expect_word("INTO")?;
        let table = self.parse_identifier()?;
        self.expect_operator("(")?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_identifier()?);
            if self.try_consume_operator(",") {
                continue;
            }
            break;
        }
        self.expect_operator(")")?;
        self.expect_word("VALUES")?;

        let mut rows = Vec::new();
        loop {
            self.expect_operator("(")?;
            let mut values = Vec::new();
            loop {
                values.push(self.parse_literal()?);
                if self.try_consume_operator(",") {
                    continue;
                }
                break;
            }
            self.expect_operator(")")?;
            rows.push(values);
            if self.try_consume_operator(",") {
                continue;
            }
            break;
        }
        Ok(Statement::Insert { table, columns, rows })
    }

    fn parse_select(&mut self) -> DbResult<Statement> {
        let columns = if self.try_consume_operator("*") {
            SelectColumns::All
        } else {
            let mut names = vec![self.parse_identifier()?];
            while self.try_consume_operator(",") {
                names.push(self.parse_identifier()?);
            }
            SelectColumns::Named(names)
        };
        self.expect_word("FROM")?;
        let table = self.parse_identifier()?;

        let mut joins = Vec::new();
        loop {
            let join_type = if self.try_consume_word("LEFT") {
                Some(JoinType::Left)
            } else if self.try_consume_word("RIGHT") {
                Some(JoinType::Right)
            } else if self.try_consume_word("INNER") {
                Some(JoinType::Inner)
            } else if self.try_consume_word("CROSS") {
                Some(JoinType::Cross)
            } else if self.try_consume_word("FULL") {
                Some(JoinType::Full)
            } else if self.at_word("JOIN") {
                Some(JoinType::Inner)
            } else {
                None
            };
            let Some(join_type) = join_type else { break };
            self.expect_word("JOIN")?;
            let right_table = self.parse_identifier()?;
            self.expect_word("ON")?;
            let left_attr = self.parse_qualified_column()?;
            self.expect_operator("=")?;
            let right_attr = self.parse_qualified_column()?;
            joins.push(JoinClause { join_type, right_table, left_attr, right_attr });
        }

        let where_clause = if self.try_consume_word("WHERE") {
            Some(self.parse_where_clause()?)
        } else {
            None
        };

        let mut order_by = Vec::new();
        if self.try_consume_word("ORDER") {
            self.expect_word("BY")?;
            order_by.push(self.parse_identifier()?);
            while self.try_consume_operator(",") {
                order_by.push(self.parse_identifier()?);
            }
        }

        let limit = if self.try_consume_word("LIMIT") {
            match self.advance() {
                Some(Token::IntLiteral(n)) => Some(*n as usize),
                other => return Err(DbError::ValueExpected(format!("{:?}", other))),
            }
        } else {
            None
        };

        Ok(Statement::Select {
            query: SelectQuery { table, columns, joins, where_clause, order_by, limit },
        })
    }

    fn parse_update(&mut self) -> DbResult<Statement> {
        let table = self.parse_identifier()?;
        self.expect_word("SET")?;
        let mut assignments = Vec::new();
        loop {
            let col = self.parse_identifier()?;
            self.expect_operator("=")?;
            let value = self.parse_literal()?;
            assignments.push((col, value));
            if self.try_consume_operator(",") {
                continue;
            }
            break;
        }
        let where_clause = if self.try_consume_word("WHERE") {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        Ok(Statement::Update { table, assignments, where_clause })
    }

    fn parse_delete(&mut self) -> DbResult<Statement> {
        self.expect_word("FROM")?;
        let table = self.parse_identifier()?;
        let where_clause = if self.try_consume_word("WHERE") {
            Some(self.parse_where_clause()?)
        } else {
            None
        };
        Ok(Statement::Delete { table, where_clause })
    }
}

/// Recognizes the leading keyword(s) and dispatches to the matching parse
/// function (§9 DESIGN NOTES: the dispatcher is a table of
/// `(leading-keyword-tuple) → parser-fn`).
pub fn parse_statement(tokens: &[Token]) -> DbResult<Statement> {
    let mut tokens = tokens.to_vec();
    if matches!(tokens.last(), Some(Token::Operator(op)) if op == ";") {
        tokens.pop();
    }
    let mut parser = Parser::new(&tokens);

    let leading = parser
        .peek_word()
        .ok_or_else(|| DbError::KeywordExpected("empty statement".to_string()))?
        .to_ascii_uppercase();
    parser.pos += 1;

    match leading.as_str() {
        "CREATE" => {
            if parser.at_word("TABLE") {
                parser.parse_create_table()
            } else {
                parser.parse_create_database()
            }
        }
        "DROP" => parser.parse_drop(),
        "USE" => parser.parse_use(),
        "SHOW" => parser.parse_show(),
        "DUMP" => parser.parse_dump(),
        "DESCRIBE" | "DESC" => parser.parse_describe(),
        "INSERT" => parser.parse_insert(),
        "SELECT" => parser.parse_select(),
        "UPDATE" => parser.parse_update(),
        "DELETE" => parser.parse_delete(),
        other => Err(DbError::UnknownCommand(other.to_string())),
    }
}
