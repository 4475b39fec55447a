//! Assembly parser

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use logos::Logos;
use ls8_spec::{Instruction, Opcode, Register};

/// A byte-sized value: literal or label reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(u8),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Value(Value),
}

/// What a line emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Instruction {
        opcode: Opcode,
        operands: Vec<Operand>,
    },
    /// `DB v1, v2, ...`
    Data(Vec<Value>),
}

impl Item {
    /// Bytes this item occupies once encoded
    pub fn size(&self) -> usize {
        match self {
            Item::Instruction { opcode, .. } => opcode.encoded_len(),
            Item::Data(values) => values.len(),
        }
    }
}

/// One parsed source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based source line
    pub line: usize,
    pub labels: Vec<String>,
    pub item: Option<Item>,
}

/// Parse register name: `R0`-`R7` or `SP`, case-insensitive
pub fn parse_register(name: &str) -> Option<Register> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("sp") {
        return Some(Register::SP);
    }

    let digits = name.strip_prefix(['r', 'R'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u8>().ok().and_then(Register::from_index)
}

/// Anything shaped like a register name, valid or not
fn is_register_like(name: &str) -> bool {
    if name.eq_ignore_ascii_case("sp") {
        return true;
    }
    match name.strip_prefix(['r', 'R']) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Parse a single instruction from assembly text.
///
/// Labels are not allowed here since there is nothing to resolve them against.
pub fn parse_instruction(text: &str) -> Result<Instruction> {
    let statement = parse_line(text, 1)?;
    match statement.item {
        Some(Item::Instruction { opcode, operands }) if statement.labels.is_empty() => {
            crate::encoder::build(opcode, &operands, 1, |value| match value {
                Value::Literal(byte) => Ok(*byte),
                Value::Label(label) => Err(AssemblerError::UndefinedLabel {
                    line: 1,
                    label: label.clone(),
                }),
            })
        }
        _ => Err(AssemblerError::SyntaxError {
            line: 1,
            column: 1,
            message: "Expected a single instruction".to_string(),
        }),
    }
}

/// Parse one source line: `[label:]* [MNEMONIC [op {, op}]]`
pub fn parse_line(text: &str, line: usize) -> Result<Statement> {
    let tokens = tokenize(text, line)?;
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
        line,
    };

    let mut labels = Vec::new();
    while let (Some(Token::Identifier(name)), Some(Token::Colon)) =
        (cursor.peek(0), cursor.peek(1))
    {
        labels.push(name.clone());
        cursor.pos += 2;
    }

    let item = match cursor.next() {
        None => None,
        Some((Token::Identifier(word), column)) => {
            let item = if word.eq_ignore_ascii_case("db") {
                Item::Data(parse_data(&mut cursor, column)?)
            } else {
                let opcode =
                    Opcode::from_mnemonic(word).ok_or_else(|| AssemblerError::UnknownInstruction {
                        line,
                        mnemonic: word.clone(),
                    })?;
                Item::Instruction {
                    opcode,
                    operands: parse_operands(&mut cursor)?,
                }
            };
            Some(item)
        }
        Some((token, column)) => {
            return Err(AssemblerError::SyntaxError {
                line,
                column,
                message: format!("Expected instruction or label, found {:?}", token),
            })
        }
    };

    Ok(Statement { line, labels, item })
}

fn tokenize(text: &str, line: usize) -> Result<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(token) = lexer.next() {
        let column = lexer.span().start + 1;
        match token {
            Ok(token) => tokens.push((token, column)),
            Err(()) => {
                return Err(AssemblerError::SyntaxError {
                    line,
                    column,
                    message: format!("Unexpected input '{}'", lexer.slice()),
                })
            }
        }
    }

    Ok(tokens)
}

struct Cursor<'a> {
    tokens: &'a [(Token, usize)],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(&'a Token, usize)> {
        let (token, column) = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some((token, *column))
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Comma-separated operand list, possibly empty
fn parse_operands(cursor: &mut Cursor) -> Result<Vec<Operand>> {
    let mut operands = Vec::new();
    if cursor.is_done() {
        return Ok(operands);
    }

    loop {
        operands.push(parse_operand(cursor)?);
        match cursor.next() {
            None => return Ok(operands),
            Some((Token::Comma, _)) => continue,
            Some((token, column)) => {
                return Err(AssemblerError::SyntaxError {
                    line: cursor.line,
                    column,
                    message: format!("Expected ',' between operands, found {:?}", token),
                })
            }
        }
    }
}

fn parse_data(cursor: &mut Cursor, column: usize) -> Result<Vec<Value>> {
    let operands = parse_operands(cursor)?;
    if operands.is_empty() {
        return Err(AssemblerError::SyntaxError {
            line: cursor.line,
            column,
            message: "DB expects at least one value".to_string(),
        });
    }

    operands
        .into_iter()
        .map(|operand| match operand {
            Operand::Value(value) => Ok(value),
            Operand::Register(reg) => Err(AssemblerError::SyntaxError {
                line: cursor.line,
                column,
                message: format!("DB expects values, found register {}", reg),
            }),
        })
        .collect()
}

fn parse_operand(cursor: &mut Cursor) -> Result<Operand> {
    let line = cursor.line;
    match cursor.next() {
        Some((Token::Identifier(name), _)) if is_register_like(name) => parse_register(name)
            .map(Operand::Register)
            .ok_or_else(|| AssemblerError::InvalidRegister {
                line,
                name: name.clone(),
            }),
        Some((Token::Identifier(name), _)) => Ok(Operand::Value(Value::Label(name.clone()))),
        Some((token, column)) => match token.number() {
            Some(n) => u8::try_from(n)
                .map(|byte| Operand::Value(Value::Literal(byte)))
                .map_err(|_| AssemblerError::InvalidImmediate {
                    line,
                    value: n.to_string(),
                }),
            None => Err(AssemblerError::SyntaxError {
                line,
                column,
                message: format!("Expected operand, found {:?}", token),
            }),
        },
        None => Err(AssemblerError::SyntaxError {
            line,
            column: 0,
            message: "Expected operand after ','".to_string(),
        }),
    }
}
