//! Instruction tree node types
//!
//! Scripts arrive already built as JSON trees. Every node carries a `type` tag;
//! `Command` nodes carry a second `cmdType` tag selecting which field holds
//! their children. Tags that are not known here deserialize to `Unknown` and are
//! treated as leaves.

use serde::{Deserialize, Serialize};

/* ===================== Instructions ===================== */

/// Instruction tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Instruction {
    /// Top-level sequence of instructions
    Script { instructions: Vec<Instruction> },

    /// Composite command, see [`Command`]
    Command(Command),

    /// A line of dialogue appended to the scope's dialog buffer
    Dialog { text: String },

    /// Inline expression evaluated against the scope's variables
    Expression { expr: Expr },

    /// Pause marker: suspends the interpreter until the next call
    Pause,

    #[serde(other)]
    Unknown,
}

/// Composite command node, tagged by `cmdType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmdType")]
pub enum Command {
    /// Conditional; children are the links of the if/else-if/else chain
    IfBlock { chain: Vec<Instruction> },

    /// One link of an `IfBlock` chain
    IfChainLink { block: Vec<Instruction> },

    /// Loop body
    EachBlock { block: Vec<Instruction> },

    #[serde(other)]
    Unknown,
}

impl Instruction {
    /// Parse an instruction tree from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Short name of this node's kind (used in logs and `gds check`)
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Script { .. } => "Script",
            Instruction::Command(Command::IfBlock { .. }) => "IfBlock",
            Instruction::Command(Command::IfChainLink { .. }) => "IfChainLink",
            Instruction::Command(Command::EachBlock { .. }) => "EachBlock",
            Instruction::Command(Command::Unknown) => "Command",
            Instruction::Dialog { .. } => "Dialog",
            Instruction::Expression { .. } => "Expression",
            Instruction::Pause => "Pause",
            Instruction::Unknown => "Unknown",
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Instruction::Pause)
    }
}

/* ===================== Expressions ===================== */

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    LitNull,
    LitBool { v: bool },
    LitNum { v: f64 },
    LitStr { v: String },
    Ident { name: String },
    Assign { name: String, value: Box<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        f.write_str(symbol)
    }
}
