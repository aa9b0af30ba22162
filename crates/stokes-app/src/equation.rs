//! Presentation of the two sides of Stokes' theorem.

use meval::tokenizer::{Operation, Token};
use meval::Expr;

use crate::controller::StokesResult;
use crate::inputs::FormulaSet;

/// Receives the equations after every recomputation.
pub trait EquationDisplay {
    fn update(&mut self, formulas: &FormulaSet, result: &StokesResult);
}

/// meval function names with a LaTeX operator of their own.
const TEX_FUNCTIONS: [(&str, &str); 12] = [
    ("sin", "\\sin"),
    ("cos", "\\cos"),
    ("tan", "\\tan"),
    ("asin", "\\arcsin"),
    ("acos", "\\arccos"),
    ("atan", "\\arctan"),
    ("sinh", "\\sinh"),
    ("cosh", "\\cosh"),
    ("tanh", "\\tanh"),
    ("exp", "\\exp"),
    ("ln", "\\ln"),
    ("max", "\\max"),
];

/// Both integrals as display-math LaTeX, with the field written out as a
/// column vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatexEquations {
    /// `\iint (curl F) . dS = lhs`
    pub surface: String,
    /// `\oint F . dΓ = rhs`
    pub boundary: String,
}

impl LatexEquations {
    pub fn new() -> Self {
        Self::default()
    }

    /// `\begin{pmatrix}Fx \\ Fy \\ Fz\end{pmatrix}`
    pub fn field_matrix(formulas: &FormulaSet) -> String {
        let [fx, fy, fz] = [0, 1, 2].map(|i| to_tex(&formulas.field[i]));
        format!("\\begin{{pmatrix}}{fx} \\\\ {fy} \\\\ {fz}\\end{{pmatrix}}")
    }
}

impl EquationDisplay for LatexEquations {
    fn update(&mut self, formulas: &FormulaSet, result: &StokesResult) {
        let field = Self::field_matrix(formulas);
        self.surface = format!(
            "\\iint _{{\\Sigma }}(\\nabla \\times {field})\\cdot d\\vec{{S}} = {}",
            result.surface_integral
        );
        self.boundary = format!(
            "\\oint _{{\\partial \\Sigma }}{field} \\cdot d\\vec{{\\Gamma}} = {}",
            result.boundary_integral
        );
    }
}

impl std::fmt::Display for LatexEquations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.surface)?;
        write!(f, "{}", self.boundary)
    }
}

/// Binding strength of a typeset subexpression, loosest first. Matches the
/// operator precedence meval parses with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Sum,
    Product,
    Unary,
    Power,
    Atom,
}

struct Tex {
    text: String,
    prec: Prec,
}

impl Tex {
    fn new(text: String, prec: Prec) -> Self {
        Self { text, prec }
    }

    fn atom(text: String) -> Self {
        Self::new(text, Prec::Atom)
    }

    /// Text of `self`, parenthesized when it binds looser than `min`.
    fn at_least(&self, min: Prec) -> String {
        if self.prec < min {
            format!("\\left({}\\right)", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Typeset an infix formula as LaTeX.
///
/// The formula is parsed with meval and rebuilt from its RPN: powers get a
/// braced exponent, quotients become `\frac`, products use `\cdot` and
/// parentheses are kept only where precedence needs them. Text that does not
/// parse is returned unchanged.
pub fn to_tex(formula: &str) -> String {
    formula
        .parse::<Expr>()
        .ok()
        .and_then(|expr| rpn_to_tex(&expr))
        .unwrap_or_else(|| formula.to_owned())
}

fn rpn_to_tex(rpn: &[Token]) -> Option<String> {
    let mut stack: Vec<Tex> = Vec::with_capacity(rpn.len());
    for token in rpn {
        let tex = match token {
            Token::Number(n) => Tex::atom(n.to_string()),
            Token::Var(name) if name == "pi" => Tex::atom("\\pi".to_owned()),
            Token::Var(name) => Tex::atom(name.clone()),
            Token::Unary(Operation::Minus) => {
                let operand = stack.pop()?;
                Tex::new(format!("-{}", operand.at_least(Prec::Unary)), Prec::Unary)
            }
            Token::Unary(_) => stack.pop()?,
            Token::Binary(op) => {
                let rhs = stack.pop()?;
                let lhs = stack.pop()?;
                binary(*op, lhs, rhs)
            }
            Token::Func(name, arity) => {
                let arity = arity.unwrap_or(0);
                let args = stack.split_off(stack.len().checked_sub(arity)?);
                function(name, &args)
            }
            Token::LParen | Token::RParen | Token::Comma => return None,
        };
        stack.push(tex);
    }

    let tex = stack.pop()?;
    stack.is_empty().then_some(tex.text)
}

fn binary(op: Operation, lhs: Tex, rhs: Tex) -> Tex {
    match op {
        Operation::Plus => Tex::new(format!("{} + {}", lhs.text, rhs.text), Prec::Sum),
        // Right operand of a difference keeps its parentheses
        Operation::Minus => Tex::new(
            format!("{} - {}", lhs.text, rhs.at_least(Prec::Product)),
            Prec::Sum,
        ),
        Operation::Times => Tex::new(
            format!("{} \\cdot {}", lhs.at_least(Prec::Product), rhs.at_least(Prec::Product)),
            Prec::Product,
        ),
        Operation::Div => Tex::atom(format!("\\frac{{{}}}{{{}}}", lhs.text, rhs.text)),
        Operation::Rem => Tex::new(
            format!("{} \\bmod {}", lhs.at_least(Prec::Product), rhs.at_least(Prec::Unary)),
            Prec::Product,
        ),
        Operation::Pow => Tex::new(format!("{}^{{{}}}", lhs.at_least(Prec::Atom), rhs.text), Prec::Power),
    }
}

fn function(name: &str, args: &[Tex]) -> Tex {
    match (name, args) {
        ("sqrt", [arg]) => Tex::atom(format!("\\sqrt{{{}}}", arg.text)),
        ("abs", [arg]) => Tex::atom(format!("\\left|{}\\right|", arg.text)),
        _ => {
            let operator = TEX_FUNCTIONS
                .iter()
                .find(|(meval, _)| *meval == name)
                .map_or_else(|| format!("\\operatorname{{{name}}}"), |(_, tex)| (*tex).to_owned());
            let args: Vec<&str> = args.iter().map(|a| a.text.as_str()).collect();
            Tex::atom(format!("{operator}\\left({}\\right)", args.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tex() {
        assert_eq!(to_tex("3 * sin(v)"), "3 \\cdot \\sin\\left(v\\right)");
        assert_eq!(to_tex("y + z"), "y + z");
        // Only whole identifiers are replaced
        assert_eq!(to_tex("cosx + asin(x)"), "cosx + \\arcsin\\left(x\\right)");
    }

    #[test]
    fn test_to_tex_powers_and_roots() {
        assert_eq!(to_tex("x^10"), "x^{10}");
        assert_eq!(to_tex("(x + y)^2"), "\\left(x + y\\right)^{2}");
        assert_eq!(to_tex("-x^2"), "-x^{2}");
        assert_eq!(to_tex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(to_tex("pi * z"), "\\pi \\cdot z");
        assert_eq!(to_tex("abs(x - 1)"), "\\left|x - 1\\right|");
    }

    #[test]
    fn test_to_tex_keeps_needed_parentheses() {
        assert_eq!(to_tex("x - (y - z)"), "x - \\left(y - z\\right)");
        assert_eq!(to_tex("(x + 1) * y"), "\\left(x + 1\\right) \\cdot y");
        assert_eq!(to_tex("(x + 1) + y"), "x + 1 + y");
        assert_eq!(to_tex("1 / (x^2 + y^2)"), "\\frac{1}{x^{2} + y^{2}}");
        assert_eq!(to_tex("atan2(y, x)"), "\\operatorname{atan2}\\left(y, x\\right)");
    }

    #[test]
    fn test_to_tex_leaves_unparsed_text() {
        assert_eq!(to_tex("x +* y"), "x +* y");
        assert_eq!(to_tex("sqrt("), "sqrt(");
    }

    #[test]
    fn test_field_matrix() {
        let m = LatexEquations::field_matrix(&FormulaSet::default());
        assert_eq!(m, "\\begin{pmatrix}x \\\\ y + z \\\\ z\\end{pmatrix}");
    }

    #[test]
    fn test_update_writes_both_sides() {
        let mut eq = LatexEquations::new();
        let result = StokesResult {
            surface_integral: 1.5,
            boundary_integral: -0.25,
        };
        eq.update(&FormulaSet::default(), &result);
        assert!(eq.surface.starts_with("\\iint _{\\Sigma }(\\nabla \\times \\begin{pmatrix}"));
        assert!(eq.surface.ends_with("\\cdot d\\vec{S} = 1.5"));
        assert!(eq.boundary.starts_with("\\oint _{\\partial \\Sigma }\\begin{pmatrix}"));
        assert!(eq.boundary.ends_with("\\cdot d\\vec{\\Gamma} = -0.25"));
        assert_eq!(eq.to_string().lines().count(), 2);
    }
}
