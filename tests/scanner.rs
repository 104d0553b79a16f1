#[cfg(test)]
mod scanner_tests {
    use glox::error::LoxError;
    use glox::scanner::Scanner;
    use glox::token::{Token, TokenType};

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_operators_greedy_match() {
        assert_token_sequence(
            "! != = == < <= > >= / - ;",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::MINUS, "-"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_comments_are_skipped() {
        assert_token_sequence(
            "1 // the rest of this line vanishes != ==\n2",
            &[
                (TokenType::NUMBER(1.0), "1"),
                (TokenType::NUMBER(2.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_keywords_and_identifiers() {
        assert_token_sequence(
            "and class else false fun for if nil or print return super this true var while foo _bar b2",
            &[
                (TokenType::AND, "and"),
                (TokenType::CLASS, "class"),
                (TokenType::ELSE, "else"),
                (TokenType::FALSE, "false"),
                (TokenType::FUN, "fun"),
                (TokenType::FOR, "for"),
                (TokenType::IF, "if"),
                (TokenType::NIL, "nil"),
                (TokenType::OR, "or"),
                (TokenType::PRINT, "print"),
                (TokenType::RETURN, "return"),
                (TokenType::SUPER, "super"),
                (TokenType::THIS, "this"),
                (TokenType::TRUE, "true"),
                (TokenType::VAR, "var"),
                (TokenType::WHILE, "while"),
                (TokenType::IDENTIFIER, "foo"),
                (TokenType::IDENTIFIER, "_bar"),
                (TokenType::IDENTIFIER, "b2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_string_literal_payload() {
        let scanner = Scanner::new(b"\"hello world\"");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");

        match &tokens[0].token_type {
            TokenType::STRING(body) => assert_eq!(body, "hello world"),
            other => panic!("expected a STRING token, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_06_number_payloads() {
        let scanner = Scanner::new(b"123 123.456");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 3);

        match tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 123.0),
            ref other => panic!("expected a NUMBER token, got {:?}", other),
        }

        match tokens[1].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 123.456),
            ref other => panic!("expected a NUMBER token, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_07_trailing_dot_is_not_a_decimal() {
        // `2345.foo` is a number, a dot, and an identifier.
        assert_token_sequence(
            "2345.foo",
            &[
                (TokenType::NUMBER(2345.0), "2345"),
                (TokenType::DOT, "."),
                (TokenType::IDENTIFIER, "foo"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_08_lines_tracked_through_strings() {
        let scanner = Scanner::new(b"1\n\"two\nlines\"\nfoo");
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].line, 1);
        // A multi-line string reports the line where it closes.
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 4);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_scanner_09_token_display() {
        let number = Token::new(TokenType::NUMBER(123.0), "123".to_string(), 1);
        assert_eq!(number.to_string(), "NUMBER 123 123.0");

        let string = Token::new(TokenType::STRING("hi".to_string()), "\"hi\"".to_string(), 1);
        assert_eq!(string.to_string(), "STRING \"hi\" hi");

        let semicolon = Token::new(TokenType::SEMICOLON, ";".to_string(), 1);
        assert_eq!(semicolon.to_string(), "SEMICOLON ; null");
    }

    #[test]
    fn test_scanner_10_unterminated_string() {
        let scanner = Scanner::new(b"\"abc");
        let results: Vec<Result<Token, LoxError>> = scanner.collect();

        assert_eq!(results.len(), 2);

        let err = results[0].as_ref().expect_err("expected a lex error");
        assert!(
            err.to_string().contains("Unterminated string"),
            "unexpected message: {}",
            err
        );

        let eof = results[1].as_ref().expect("expected the EOF token");
        assert_eq!(eof.token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_11_errors_are_accumulated() {
        let source = ",.$(#";
        let scanner = Scanner::new(source.as_bytes());

        let results: Vec<Result<Token, LoxError>> = scanner.collect();

        // COMMA, DOT, error for '$', LEFT_PAREN, error for '#', EOF.
        assert_eq!(results.len(), 6, "expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "error message should contain 'Unexpected character', got: {}",
                err
            );
        }

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(token.token_type, expected_type);
                    assert_eq!(token.lexeme, expected_lexeme);
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }
}
