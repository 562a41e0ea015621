use crate::ast::*;
use crate::lexer::{LexError, Lexer, Token};
use crate::options::RawOption;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    #[error("Unexpected token: {0:?}, expected {1}")]
    Unexpected(Token, &'static str),
    #[error("Unexpected end of input")]
    UnexpectedEof,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> &Token {
        let tok = self.tokens.get(self.pos).unwrap_or(&Token::Eof);
        self.pos += 1;
        tok
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.advance().clone() {
            Token::Ident(s) => Ok(s),
            Token::Eof => Err(ParseError::UnexpectedEof),
            tok => Err(ParseError::Unexpected(tok, "identifier")),
        }
    }

    fn expect(&mut self, expected: Token, what: &'static str) -> Result<(), ParseError> {
        let tok = self.advance().clone();
        if tok == expected {
            Ok(())
        } else if tok == Token::Eof {
            Err(ParseError::UnexpectedEof)
        } else {
            Err(ParseError::Unexpected(tok, what))
        }
    }

    fn check_ident(&self, name: &str) -> bool {
        matches!(self.peek(), Token::Ident(s) if s == name)
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Token::Ident(s) if s == keyword => {
                self.advance();
                Ok(())
            }
            Token::Eof => Err(ParseError::UnexpectedEof),
            tok => Err(ParseError::Unexpected(tok.clone(), keyword)),
        }
    }

    pub fn parse(&mut self) -> Result<Catalog, ParseError> {
        let mut catalog = Catalog::default();

        while *self.peek() != Token::Eof {
            if self.check_ident("wrapper") {
                self.advance();
                let name = self.expect_ident()?;
                let options = self.parse_options_block()?;
                catalog.wrappers.push(Wrapper { name, options });
            } else if self.check_ident("server") {
                self.advance();
                let name = self.expect_ident()?;
                let options = self.parse_options_block()?;
                catalog.servers.push(Server { name, options });
            } else if self.check_ident("table") {
                self.advance();
                catalog.tables.push(self.parse_table()?);
            } else if self.check_ident("mapping") {
                self.advance();
                self.expect_keyword("for")?;
                let server = self.expect_ident()?;
                let options = self.parse_options_block()?;
                catalog.mappings.push(UserMapping { server, options });
            } else {
                return Err(ParseError::Unexpected(
                    self.peek().clone(),
                    "wrapper, server, table, or mapping",
                ));
            }
        }

        Ok(catalog)
    }

    /// Parse `{ name = "value" ... }`
    fn parse_options_block(&mut self) -> Result<Vec<RawOption>, ParseError> {
        self.expect(Token::LBrace, "{")?;
        let mut options = Vec::new();
        while *self.peek() != Token::RBrace {
            options.push(self.parse_option()?);
        }
        self.expect(Token::RBrace, "}")?;
        Ok(options)
    }

    fn parse_option(&mut self) -> Result<RawOption, ParseError> {
        let name = self.expect_ident()?;
        self.expect(Token::Eq, "=")?;
        match self.advance().clone() {
            Token::Str(value) => Ok(RawOption { name, value }),
            Token::Eof => Err(ParseError::UnexpectedEof),
            tok => Err(ParseError::Unexpected(tok, "quoted option value")),
        }
    }

    fn parse_table(&mut self) -> Result<Table, ParseError> {
        let name = self.expect_ident()?;
        self.expect_keyword("on")?;
        let server = self.expect_ident()?;
        self.expect(Token::LBrace, "{")?;

        let mut columns = Vec::new();
        let mut options = Vec::new();

        while *self.peek() != Token::RBrace {
            if *self.peek() == Token::Eof {
                return Err(ParseError::UnexpectedEof);
            }
            if *self.peek_at(1) == Token::Eq {
                options.push(self.parse_option()?);
            } else {
                columns.push(self.parse_column()?);
            }
        }

        self.expect(Token::RBrace, "}")?;

        Ok(Table {
            name,
            server,
            columns,
            options,
        })
    }

    fn parse_column(&mut self) -> Result<Column, ParseError> {
        let name = self.expect_ident()?;
        let typ = self.expect_ident()?;

        let mut length = None;
        if *self.peek() == Token::LParen {
            self.advance();
            match self.advance().clone() {
                Token::Num(n) => length = Some(n),
                Token::Eof => return Err(ParseError::UnexpectedEof),
                tok => return Err(ParseError::Unexpected(tok, "column length")),
            }
            self.expect(Token::RParen, ")")?;
        }

        Ok(Column { name, typ, length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server() {
        let input = r#"
            server graph {
                node_id_len = "16"
            }
        "#;
        let catalog = Parser::new(input).unwrap().parse().unwrap();
        assert_eq!(catalog.servers.len(), 1);
        assert_eq!(catalog.servers[0].name, "graph");
        assert_eq!(
            catalog.servers[0].options,
            vec![RawOption::new("node_id_len", "16")]
        );
    }

    #[test]
    fn test_parse_table() {
        let input = r#"
            table graph_edges on graph {
                node varchar(32)
                relation = "edges"
                parent varchar(32)
                weight int
            }
        "#;
        let catalog = Parser::new(input).unwrap().parse().unwrap();
        let table = &catalog.tables[0];
        assert_eq!(table.name, "graph_edges");
        assert_eq!(table.server, "graph");
        assert_eq!(table.options, vec![RawOption::new("relation", "edges")]);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.columns[1].name, "parent");
        assert_eq!(table.columns[1].length, Some(32));
        assert_eq!(table.columns[2].typ, "int");
        assert_eq!(table.columns[2].length, None);
    }

    #[test]
    fn test_parse_wrapper_and_mapping() {
        let input = r#"
            wrapper dag_fdw { }
            mapping for graph { user = "alice" }
        "#;
        let catalog = Parser::new(input).unwrap().parse().unwrap();
        assert_eq!(catalog.wrappers[0].name, "dag_fdw");
        assert!(catalog.wrappers[0].options.is_empty());
        assert_eq!(catalog.mappings[0].server, "graph");
        assert_eq!(catalog.mappings[0].options, vec![RawOption::new("user", "alice")]);
    }

    #[test]
    fn test_parse_documented_catalog() {
        let input = r#"
# comment
wrapper dag_fdw { }
server graph { node_id_len = "16" }
table graph_edges on graph {
    relation = "edges"
    node varchar(32)
    parent varchar(32)
}
mapping for graph { user = "alice" }
"#;
        let catalog = Parser::new(input).unwrap().parse().unwrap();
        assert_eq!(catalog.wrappers.len(), 1);
        assert_eq!(catalog.servers.len(), 1);
        assert_eq!(catalog.tables.len(), 1);
        assert_eq!(catalog.tables[0].columns.len(), 2);
        assert_eq!(catalog.tables[0].options, vec![RawOption::new("relation", "edges")]);
        assert_eq!(catalog.mappings.len(), 1);
        assert_eq!(catalog.mappings[0].server, "graph");
    }

    #[test]
    fn test_option_values_must_be_quoted() {
        let err = Parser::new("server s { node_id_len = 16 }")
            .unwrap()
            .parse()
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected(Token::Num(16), "quoted option value")
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let err = Parser::new("table t on s { node varchar(32)")
            .unwrap()
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof));
    }

    #[test]
    fn test_eof_after_keyword_or_length() {
        let err = Parser::new("mapping").unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof));

        let err = Parser::new("table t").unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof));

        let err = Parser::new("table t on s { node varchar(")
            .unwrap()
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof));
    }

    #[test]
    fn test_unknown_definition() {
        let err = Parser::new("view v { }").unwrap().parse().unwrap_err();
        assert!(matches!(err, ParseError::Unexpected(Token::Ident(ref s), _) if s == "view"));
    }
}
