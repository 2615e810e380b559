// URI template parser using recursive descent

use anyhow::{bail, Result};

use super::ast::{Operator, OperatorExpr, Template, TemplatePart, VariableExpr};

pub struct TemplateParser {
    input: String,
    pos: usize,
}

impl TemplateParser {
    pub fn parse(template: &str) -> Result<Template> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            if self.peek_char() == Some('{') {
                // Check for escaped braces {{
                if self.peek_ahead(1) == Some('{') {
                    self.pos += 2;
                    literal_buf.push('{');
                } else {
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    parts.push(self.parse_expression()?);
                }
            } else if self.peek_char() == Some('}') {
                if self.peek_ahead(1) == Some('}') {
                    self.pos += 2;
                    literal_buf.push('}');
                } else {
                    bail!("Unexpected closing brace at position {}", self.pos);
                }
            } else {
                literal_buf.push(self.consume_char()?);
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_expression(&mut self) -> Result<TemplatePart> {
        self.expect_char('{')?;
        self.skip_whitespace();

        if self.peek_char() == Some('-') {
            self.consume_char()?;
            let op = self.parse_operator()?;
            Ok(TemplatePart::Operator(op))
        } else {
            let var = self.parse_variable()?;
            Ok(TemplatePart::Variable(var))
        }
    }

    fn parse_variable(&mut self) -> Result<VariableExpr> {
        let name = self.parse_identifier()?;
        self.skip_whitespace();

        let mut var = VariableExpr::new(name);
        if self.peek_char() == Some('=') {
            self.consume_char()?;
            var = var.with_default(self.parse_default_value()?);
        }

        self.skip_whitespace();
        self.expect_char('}')?;
        Ok(var)
    }

    fn parse_operator(&mut self) -> Result<OperatorExpr> {
        let start = self.pos;
        let op_name = self.parse_identifier()?;
        let op = match Operator::from_name(&op_name) {
            Some(op) => op,
            None => bail!("Unknown template operator '-{}' at position {}", op_name, start),
        };
        self.expect_char('|')?;

        // The argument is taken verbatim, whitespace included
        let mut arg = String::new();
        while let Some(ch) = self.peek_char() {
            if ch == '|' || ch == '}' {
                break;
            }
            arg.push(self.consume_char()?);
        }
        self.expect_char('|')?;

        let mut variables = Vec::new();
        loop {
            self.skip_whitespace();
            variables.push(self.parse_identifier()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.consume_char()?;
                }
                Some('}') => {
                    self.consume_char()?;
                    break;
                }
                Some(ch) => bail!(
                    "Expected ',' or '}}' but found '{}' at position {}",
                    ch,
                    self.pos
                ),
                None => bail!("Unexpected end of input in variable list"),
            }
        }

        if op.is_single_variable() && variables.len() != 1 {
            bail!(
                "Operator '-{}' takes exactly one variable, got {}",
                op_name,
                variables.len()
            );
        }

        Ok(OperatorExpr { op, arg, variables })
    }

    fn parse_default_value(&mut self) -> Result<String> {
        let mut value = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '}' {
                break;
            }
            value.push(self.consume_char()?);
        }

        Ok(value.trim().to_string())
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(self.consume_char()?);
            } else {
                break;
            }
        }

        if ident.is_empty() {
            match self.peek_char() {
                Some(ch) => bail!(
                    "Invalid character '{}' in variable name at position {}",
                    ch,
                    self.pos
                ),
                None => bail!("Expected identifier but found end of input"),
            }
        }

        Ok(ident)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self
            .peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_variable() {
        let template = TemplateParser::parse("http://example.com/users/{user_id}").unwrap();
        assert_eq!(template.parts.len(), 2);

        match &template.parts[0] {
            TemplatePart::Literal(s) => assert_eq!(s, "http://example.com/users/"),
            _ => panic!("Expected literal"),
        }

        match &template.parts[1] {
            TemplatePart::Variable(var) => {
                assert_eq!(var.name, "user_id");
                assert!(var.default.is_none());
            }
            _ => panic!("Expected variable"),
        }
    }

    #[test]
    fn test_parse_variable_with_default() {
        let template = TemplateParser::parse("/reports/{year=2024}").unwrap();
        match &template.parts[1] {
            TemplatePart::Variable(var) => {
                assert_eq!(var.name, "year");
                assert_eq!(var.default, Some("2024".to_string()));
            }
            _ => panic!("Expected variable"),
        }
    }

    #[test]
    fn test_parse_prefix_operator() {
        let template = TemplateParser::parse("http://example.com/users{-prefix|.|format}").unwrap();
        assert_eq!(template.parts.len(), 2);
        match &template.parts[1] {
            TemplatePart::Operator(op) => {
                assert_eq!(op.op, Operator::Prefix);
                assert_eq!(op.arg, ".");
                assert_eq!(op.variables, vec!["format".to_string()]);
            }
            _ => panic!("Expected operator"),
        }
    }

    #[test]
    fn test_parse_join_with_several_variables() {
        let template = TemplateParser::parse("/search{-opt|?|q,page}{-join|&|q, page}").unwrap();
        assert_eq!(template.parts.len(), 3);
        match &template.parts[2] {
            TemplatePart::Operator(op) => {
                assert_eq!(op.op, Operator::Join);
                assert_eq!(op.arg, "&");
                assert_eq!(op.variables, vec!["q".to_string(), "page".to_string()]);
            }
            _ => panic!("Expected operator"),
        }
    }

    #[test]
    fn test_parse_escaped_braces() {
        let template = TemplateParser::parse("http://example.com/{{literal}}").unwrap();
        assert_eq!(template.parts.len(), 1);
        match &template.parts[0] {
            TemplatePart::Literal(s) => assert_eq!(s, "http://example.com/{literal}"),
            _ => panic!("Expected literal"),
        }
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let template = TemplateParser::parse("/{ user_id }").unwrap();
        match &template.parts[1] {
            TemplatePart::Variable(var) => assert_eq!(var.name, "user_id"),
            _ => panic!("Expected variable"),
        }
    }

    #[test]
    fn test_parse_unknown_operator_fails() {
        let result = TemplateParser::parse("/users{-list|,|ids}");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown template operator '-list'"));
    }

    #[test]
    fn test_parse_prefix_with_two_variables_fails() {
        let result = TemplateParser::parse("/users{-prefix|.|format,lang}");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("takes exactly one variable"));
    }

    #[test]
    fn test_parse_unclosed_expression_fails() {
        assert!(TemplateParser::parse("/users/{user_id").is_err());
    }

    #[test]
    fn test_parse_stray_closing_brace_fails() {
        let result = TemplateParser::parse("/users/}");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unexpected closing brace"));
    }

    #[test]
    fn test_parse_empty_variable_fails() {
        assert!(TemplateParser::parse("/users/{}").is_err());
    }
}
