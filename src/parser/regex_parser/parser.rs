use crate::error_handling::{
    Error::{EmptyPattern, PatternParsingError, UnsupportedAstNodeType},
    Result,
};
use regex_syntax::ast::{parse::Parser, Ast};

// A wrapper of `regex_syntax::ast::parse::Parser` that only lets literal
// patterns through. Escapes are resolved, so `a\.b` yields ['a', '.', 'b'].
pub struct PatternParser {
    m_parser: Parser,
}

impl PatternParser {
    pub fn new() -> PatternParser {
        Self {
            m_parser: Parser::new(),
        }
    }

    pub fn parse_into_ast(&mut self, pattern: &str) -> Result<Ast> {
        match self.m_parser.parse(pattern) {
            Ok(ast) => Ok(ast),
            Err(e) => Err(PatternParsingError(e)),
        }
    }

    pub fn parse_literal(&mut self, pattern: &str) -> Result<Vec<char>> {
        let ast = self.parse_into_ast(pattern)?;
        let mut literal = Vec::new();
        Self::collect_literal(&ast, &mut literal)?;
        if literal.is_empty() {
            return Err(EmptyPattern);
        }
        Ok(literal)
    }

    fn collect_literal(ast: &Ast, literal: &mut Vec<char>) -> Result<()> {
        match ast {
            Ast::Empty(_) => Ok(()),
            Ast::Literal(lit) => {
                literal.push(lit.c);
                Ok(())
            }
            Ast::Concat(concat) => concat
                .asts
                .iter()
                .try_for_each(|ast| Self::collect_literal(ast, literal)),
            Ast::Flags(_) => Err(UnsupportedAstNodeType("Flags")),
            Ast::Dot(_) => Err(UnsupportedAstNodeType("Dot")),
            Ast::Assertion(_) => Err(UnsupportedAstNodeType("Assertion")),
            Ast::ClassUnicode(_) => Err(UnsupportedAstNodeType("ClassUnicode")),
            Ast::ClassPerl(_) => Err(UnsupportedAstNodeType("ClassPerl")),
            Ast::ClassBracketed(_) => Err(UnsupportedAstNodeType("ClassBracketed")),
            Ast::Repetition(_) => Err(UnsupportedAstNodeType("Repetition")),
            Ast::Group(_) => Err(UnsupportedAstNodeType("Group")),
            Ast::Alternation(_) => Err(UnsupportedAstNodeType("Alternation")),
        }
    }
}

impl Default for PatternParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;

    #[test]
    fn test_plain_literal() -> Result<()> {
        let mut parser = PatternParser::new();
        assert_eq!(parser.parse_literal("abba")?, vec!['a', 'b', 'b', 'a']);
        assert_eq!(parser.parse_literal("x")?, vec!['x']);
        Ok(())
    }

    #[test]
    fn test_escaped_metacharacters() -> Result<()> {
        let mut parser = PatternParser::new();
        assert_eq!(parser.parse_literal(r"a\.b\*")?, vec!['a', '.', 'b', '*']);
        Ok(())
    }

    #[test]
    fn test_rejects_operators() {
        let mut parser = PatternParser::new();
        assert!(matches!(
            parser.parse_literal("a|b"),
            Err(Error::UnsupportedAstNodeType("Alternation"))
        ));
        assert!(matches!(
            parser.parse_literal("ab*"),
            Err(Error::UnsupportedAstNodeType("Repetition"))
        ));
        assert!(matches!(
            parser.parse_literal("(ab)"),
            Err(Error::UnsupportedAstNodeType("Group"))
        ));
        assert!(matches!(
            parser.parse_literal("a.c"),
            Err(Error::UnsupportedAstNodeType("Dot"))
        ));
        assert!(matches!(
            parser.parse_literal(r"\d"),
            Err(Error::UnsupportedAstNodeType("ClassPerl"))
        ));
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        let mut parser = PatternParser::new();
        assert!(matches!(parser.parse_literal(""), Err(Error::EmptyPattern)));
        assert!(matches!(
            parser.parse_literal("(ab"),
            Err(Error::PatternParsingError(_))
        ));
    }
}
