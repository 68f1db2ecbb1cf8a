//! Predictive recursive-descent recognizer
//!
//! One method per production. Alternatives switch on the lookahead category,
//! loops run while the lookahead is in the body's FIRST set, and tokens are
//! consumed only through [`Parser::expect`] and [`Parser::expect_one_of`].

use super::error::{SyntaxError, SyntaxResult};
use super::first_sets;
use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::tokens::{CategorySet, Token, TokenCategory, TokenStream};

pub struct Parser<I> {
    tokens: TokenStream<I>,
    /// Open blocks plus open expressions
    depth: usize,
    max_depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            tokens: TokenStream::new(tokens),
            depth: 0,
            max_depth: MAX_PARSE_DEPTH,
        }
    }

    /// Override the compile-time nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Lookahead category
    fn current(&self) -> TokenCategory {
        self.tokens.category()
    }

    fn at(&self, set: CategorySet) -> bool {
        set.contains(self.current())
    }

    /// Consume the lookahead if it has exactly `category`
    pub fn expect(&mut self, category: TokenCategory) -> SyntaxResult<Token> {
        if self.current() == category {
            Ok(self.tokens.advance())
        } else {
            Err(SyntaxError::expected_category(
                category,
                self.tokens.current().clone(),
            ))
        }
    }

    /// Consume the lookahead if its category is in `set`
    pub fn expect_one_of(&mut self, set: CategorySet) -> SyntaxResult<Token> {
        if self.at(set) {
            Ok(self.tokens.advance())
        } else {
            Err(SyntaxError::expected_one_of(
                set,
                self.tokens.current().clone(),
            ))
        }
    }

    fn unexpected(&self, set: CategorySet) -> SyntaxError {
        SyntaxError::expected_one_of(set, self.tokens.current().clone())
    }

    /// Run a self-nesting production one level deeper, refusing past `max_depth`
    fn nested<F>(&mut self, production: F) -> SyntaxResult<()>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<()>,
    {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::max_nesting_depth(
                self.max_depth,
                self.tokens.current().clone(),
            ));
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Tokens consumed so far
    pub fn consumed(&self) -> usize {
        self.tokens.consumed()
    }

    /// Hand back the token source, e.g. to read tokenizer metrics
    pub fn into_inner(self) -> I {
        self.tokens.into_inner()
    }

    // ========================================================================
    // DEFINITIONS
    // ========================================================================

    /// Program := DefList EOF
    pub fn program(&mut self) -> SyntaxResult<()> {
        self.def_list()?;
        self.expect(TokenCategory::Eof)?;
        Ok(())
    }

    fn def_list(&mut self) -> SyntaxResult<()> {
        while self.at(first_sets::DEF) {
            self.def()?;
        }
        Ok(())
    }

    fn def(&mut self) -> SyntaxResult<()> {
        match self.current() {
            TokenCategory::Var => self.var_def(),
            TokenCategory::Identifier => self.fun_def(),
            _ => Err(self.unexpected(first_sets::DEF)),
        }
    }

    fn var_def(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Var)?;
        self.id_list()?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    fn id_list(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Identifier)?;
        while self.current() == TokenCategory::Comma {
            self.expect(TokenCategory::Comma)?;
            self.expect(TokenCategory::Identifier)?;
        }
        Ok(())
    }

    fn fun_def(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Identifier)?;
        self.expect(TokenCategory::OpenParen)?;
        if self.current() == TokenCategory::Identifier {
            self.id_list()?;
        }
        self.expect(TokenCategory::CloseParen)?;
        self.expect(TokenCategory::OpenBrace)?;
        while self.current() == TokenCategory::Var {
            self.var_def()?;
        }
        self.stmt_list()?;
        self.expect(TokenCategory::CloseBrace)?;
        Ok(())
    }

    // ========================================================================
    // STATEMENTS
    // ========================================================================

    fn stmt_list(&mut self) -> SyntaxResult<()> {
        while self.at(first_sets::STMT) {
            self.stmt()?;
        }
        Ok(())
    }

    fn stmt(&mut self) -> SyntaxResult<()> {
        match self.current() {
            TokenCategory::Identifier => {
                self.expect(TokenCategory::Identifier)?;
                match self.current() {
                    TokenCategory::Assign => self.assign(),
                    TokenCategory::OpenParen => self.fun_call_stmt(),
                    // Reports the whole statement set, not just `=` or `(`
                    _ => Err(self.unexpected(first_sets::STMT)),
                }
            }
            TokenCategory::Inc => self.inc(),
            TokenCategory::Dec => self.dec(),
            TokenCategory::If => self.if_stmt(),
            TokenCategory::While => self.while_stmt(),
            TokenCategory::Do => self.do_stmt(),
            TokenCategory::Break => {
                self.expect(TokenCategory::Break)?;
                self.expect(TokenCategory::Semicolon)?;
                Ok(())
            }
            TokenCategory::Return => {
                self.expect(TokenCategory::Return)?;
                self.expr()?;
                self.expect(TokenCategory::Semicolon)?;
                Ok(())
            }
            TokenCategory::Semicolon => {
                self.expect(TokenCategory::Semicolon)?;
                Ok(())
            }
            _ => Err(self.unexpected(first_sets::STMT)),
        }
    }

    fn assign(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Assign)?;
        self.expr()?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    fn fun_call_stmt(&mut self) -> SyntaxResult<()> {
        self.fun_call()?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    fn fun_call(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::OpenParen)?;
        self.expr_list()?;
        self.expect(TokenCategory::CloseParen)?;
        Ok(())
    }

    fn inc(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Inc)?;
        self.expect(TokenCategory::Identifier)?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    fn dec(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Dec)?;
        self.expect(TokenCategory::Identifier)?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    /// `( Expr ) { StmtList }`, shared by if, elif and while
    fn guarded_block(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::OpenParen)?;
        self.expr()?;
        self.expect(TokenCategory::CloseParen)?;
        self.block()
    }

    fn block(&mut self) -> SyntaxResult<()> {
        self.nested(|parser| {
            parser.expect(TokenCategory::OpenBrace)?;
            parser.stmt_list()?;
            parser.expect(TokenCategory::CloseBrace)?;
            Ok(())
        })
    }

    fn if_stmt(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::If)?;
        self.guarded_block()?;
        while self.current() == TokenCategory::Elif {
            self.expect(TokenCategory::Elif)?;
            self.guarded_block()?;
        }
        if self.current() == TokenCategory::Else {
            self.expect(TokenCategory::Else)?;
            self.block()?;
        }
        Ok(())
    }

    fn while_stmt(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::While)?;
        self.guarded_block()
    }

    fn do_stmt(&mut self) -> SyntaxResult<()> {
        self.expect(TokenCategory::Do)?;
        self.block()?;
        self.expect(TokenCategory::While)?;
        self.expect(TokenCategory::OpenParen)?;
        self.expr()?;
        self.expect(TokenCategory::CloseParen)?;
        self.expect(TokenCategory::Semicolon)?;
        Ok(())
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn expr(&mut self) -> SyntaxResult<()> {
        self.nested(Self::expr_or)
    }

    fn expr_or(&mut self) -> SyntaxResult<()> {
        self.expr_and()?;
        while self.current() == TokenCategory::Or {
            self.expect(TokenCategory::Or)?;
            self.expr_and()?;
        }
        Ok(())
    }

    fn expr_and(&mut self) -> SyntaxResult<()> {
        self.expr_comp()?;
        while self.current() == TokenCategory::And {
            self.expect(TokenCategory::And)?;
            self.expr_comp()?;
        }
        Ok(())
    }

    fn expr_comp(&mut self) -> SyntaxResult<()> {
        self.expr_rel()?;
        while self.at(first_sets::COMP_OP) {
            self.expect_one_of(first_sets::COMP_OP)?;
            self.expr_rel()?;
        }
        Ok(())
    }

    fn expr_rel(&mut self) -> SyntaxResult<()> {
        self.expr_add()?;
        while self.at(first_sets::REL_OP) {
            self.expect_one_of(first_sets::REL_OP)?;
            self.expr_add()?;
        }
        Ok(())
    }

    fn expr_add(&mut self) -> SyntaxResult<()> {
        self.expr_mul()?;
        while self.at(first_sets::ADD_OP) {
            self.expect_one_of(first_sets::ADD_OP)?;
            self.expr_mul()?;
        }
        Ok(())
    }

    fn expr_mul(&mut self) -> SyntaxResult<()> {
        self.expr_unary()?;
        while self.at(first_sets::MUL_OP) {
            self.expect_one_of(first_sets::MUL_OP)?;
            self.expr_unary()?;
        }
        Ok(())
    }

    fn expr_unary(&mut self) -> SyntaxResult<()> {
        while self.at(first_sets::UNARY_OP) {
            self.expect_one_of(first_sets::UNARY_OP)?;
        }
        self.expr_primary()
    }

    fn expr_primary(&mut self) -> SyntaxResult<()> {
        match self.current() {
            TokenCategory::Identifier => {
                self.expect(TokenCategory::Identifier)?;
                if self.current() == TokenCategory::OpenParen {
                    self.fun_call()?;
                }
                Ok(())
            }
            TokenCategory::OpenBracket => {
                self.expect(TokenCategory::OpenBracket)?;
                self.expr_list()?;
                self.expect(TokenCategory::CloseBracket)?;
                Ok(())
            }
            TokenCategory::OpenParen => {
                self.expect(TokenCategory::OpenParen)?;
                self.expr()?;
                self.expect(TokenCategory::CloseParen)?;
                Ok(())
            }
            category if first_sets::LITERAL.contains(category) => {
                self.expect_one_of(first_sets::LITERAL)?;
                Ok(())
            }
            _ => Err(self.unexpected(first_sets::PRIMARY)),
        }
    }

    fn expr_list(&mut self) -> SyntaxResult<()> {
        if self.at(first_sets::EXPR) {
            self.expr()?;
            while self.current() == TokenCategory::Comma {
                self.expect(TokenCategory::Comma)?;
                self.expr()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::syntax::error::Expected;
    use crate::tokens::Position;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> SyntaxResult<()> {
        Parser::new(tokenize(source)).program()
    }

    fn parse_expr(expr: &str) -> SyntaxResult<()> {
        parse(&format!("f() {{ x = {}; }}", expr))
    }

    #[test]
    fn test_empty_program() {
        assert!(parse("").is_ok());
        assert!(parse("-- nothing here\n(* at all *)").is_ok());
    }

    #[test]
    fn test_minimal_function() {
        assert!(parse("f(){ }").is_ok());
    }

    #[test]
    fn test_missing_close_paren() {
        let error = parse("f({ }").unwrap_err();
        assert_eq!(error.expected(), Some(Expected::Category(TokenCategory::CloseParen)));
        assert_eq!(error.found().category(), TokenCategory::OpenBrace);
        assert_eq!(error.position(), Position::new(1, 3));
    }

    #[test]
    fn test_definitions() {
        let source = "
            var a, b, c;
            main(x, y) {
                var tmp;
                var z;
                tmp = x + y;
                print(tmp, [1, 2, 3], []);
                ;
            }
            var last;
        ";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_statements() {
        let source = "
            run(n) {
                inc n;
                dec n;
                if (n > 10) { break; }
                elif (n == 5) { n = 0; }
                elif (n <> 4) { }
                else { return n; }
                while (n < 100) { inc n; }
                do { dec n; } while (n >= 0);
                stop();
            }
        ";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_precedence_cascade() {
        assert!(parse_expr("1 + 2 * 3").is_ok());
        assert!(parse_expr("a and b or not c").is_ok());
        assert!(parse_expr("- - x").is_ok());
        assert!(parse_expr("not not flag").is_ok());
        assert!(parse_expr("(a + b) % c <= g(h(1), 'x', \"s\") == true").is_ok());
    }

    #[test]
    fn test_missing_operand_reports_primary_set() {
        let error = parse_expr("1 + * 2").unwrap_err();
        assert_matches!(error.expected(), Some(Expected::OneOf(set)) if set == first_sets::PRIMARY);
        assert_eq!(error.found().category(), TokenCategory::Mul);
        assert_eq!(error.found().text(), "*");
    }

    #[test]
    fn test_identifier_statement_reports_statement_set() {
        let error = parse("f() { x + 1; }").unwrap_err();
        assert_matches!(error.expected(), Some(Expected::OneOf(set)) if set == first_sets::STMT);
        assert_eq!(error.found().category(), TokenCategory::Plus);
    }

    #[test]
    fn test_top_level_statement_rejected_at_eof() {
        let error = parse("return 1;").unwrap_err();
        assert_eq!(error.expected(), Some(Expected::Category(TokenCategory::Eof)));
        assert_eq!(error.found().category(), TokenCategory::Return);
    }

    #[test]
    fn test_unterminated_block_fails_at_eof() {
        let error = parse("f() { while (x) { ").unwrap_err();
        assert!(error.is_end_of_input());
        assert_eq!(error.expected(), Some(Expected::Category(TokenCategory::CloseBrace)));
    }

    #[test]
    fn test_illegal_character_rejected() {
        let error = parse("f() { x = 1 $ 2; }").unwrap_err();
        assert_eq!(error.found().category(), TokenCategory::IllegalChar);
        assert_eq!(error.expected(), Some(Expected::Category(TokenCategory::Semicolon)));
    }

    #[test]
    fn test_expression_list_trailing_comma() {
        let error = parse("f() { g(1,); }").unwrap_err();
        assert_matches!(error.expected(), Some(Expected::OneOf(set)) if set == first_sets::PRIMARY);
        assert_eq!(error.found().category(), TokenCategory::CloseParen);
    }

    #[test]
    fn test_missing_eof_is_synthesized() {
        let tokens: Vec<Token> = tokenize("f() { }").filter(|t| !t.is_eof()).collect();
        assert!(Parser::new(tokens).program().is_ok());
    }

    #[test]
    fn test_consumed_count() {
        let mut parser = Parser::new(tokenize("var a;"));
        parser.program().unwrap();
        assert_eq!(parser.consumed(), 3);
    }

    #[test]
    fn test_multi_line_string_accepted() {
        assert!(parse("f() { x = \"a\nb\"; print('\n'); }").is_ok());
    }

    #[test]
    fn test_nesting_within_limit() {
        let depth = MAX_PARSE_DEPTH / 2;
        let expr = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse_expr(&expr).is_ok());
    }

    #[test]
    fn test_deep_parentheses_hit_nesting_limit() {
        let expr = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        let error = parse_expr(&expr).unwrap_err();

        assert_matches!(
            &error,
            SyntaxError::MaxNestingDepth { max_depth, .. } if *max_depth == MAX_PARSE_DEPTH
        );
        assert_eq!(error.found().category(), TokenCategory::OpenParen);
        assert_eq!(error.expected(), None);
    }

    #[test]
    fn test_deep_blocks_hit_nesting_limit() {
        let source = format!(
            "f() {{ {} {} }}",
            "while (x) {".repeat(5_000),
            "}".repeat(5_000)
        );
        let error = parse(&source).unwrap_err();
        assert_matches!(error, SyntaxError::MaxNestingDepth { .. });
    }

    #[test]
    fn test_custom_nesting_limit() {
        let tokens = tokenize("f() { x = (((1))); }");
        let error = Parser::new(tokens).with_max_depth(3).program().unwrap_err();

        assert_eq!(error.found().category(), TokenCategory::IntLiteral);
        assert_eq!(error.position(), Position::new(1, 14));

        let tokens = tokenize("f() { x = ((1)); }");
        assert!(Parser::new(tokens).with_max_depth(3).program().is_ok());
    }

    fn rejoined(source: &str) -> String {
        crate::lexical::collect_tokens(source)
            .iter()
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_round_trip_outcome() {
        let sources = [
            "f(a){ var t; t = a * (a - 1); return t; }",
            "g(){ if (x) { } else { y(); } }",
            "h(){ x = 1 + * 2; }",
            "k({ }",
            "m(){ -- note\n x = 1; (* block\n comment *) }",
            "n(){ x = 1 $ 2; }",
        ];

        for source in sources {
            let joined = rejoined(source);
            let original = parse(source).map_err(|e| (e.expected(), e.found().category()));
            let again = parse(&joined).map_err(|e| (e.expected(), e.found().category()));
            assert_eq!(original, again, "round trip differs for {:?}", source);
        }
    }

    #[test]
    fn test_round_trip_drops_comments() {
        let joined = rejoined("m(){ -- note\n x = 1; (* block *) }");
        assert_eq!(joined, "m ( ) { x = 1 ; } ");
    }

    #[test]
    fn test_round_trip_needs_legal_characters() {
        // Two stray quotes join into the char literal `' '`
        let source = "f(){ x = ''; }";
        assert!(parse(source).is_err());
        assert!(parse(&rejoined(source)).is_ok());
    }
}
