use crate::expr::Expr;
use crate::stmt::Stmt;

/// Debug printer producing a parenthesized, Lisp-like rendering of the tree.
pub struct Ast;

impl Ast {
    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                self.print(left),
                self.print(right)
            ),

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut out: String = format!("(call {}", self.print(callee));
                for argument in arguments {
                    out.push(' ');
                    out.push_str(&self.print(argument));
                }
                out.push(')');
                out
            }

            Expr::Get { object, name } => format!("(. {} {})", self.print(object), name.lexeme),

            Expr::Grouping(inner) => format!("(group {})", self.print(inner)),

            Expr::Literal(literal) => literal.to_string(),

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(= (. {} {}) {})",
                self.print(object),
                name.lexeme,
                self.print(value)
            ),

            Expr::Super { method, .. } => format!("(super {})", method.lexeme),

            Expr::This { .. } => "this".to_string(),

            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, self.print(right))
            }

            Expr::Variable { name, .. } => name.lexeme.to_string(),
        }
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Block(statements) => {
                let inner: Vec<String> = statements.iter().map(|s| self.print_stmt(s)).collect();
                format!("(block {})", inner.join(" "))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                let mut out: String = format!("(class {}", name.lexeme);
                if let Some(superclass) = superclass {
                    out.push_str(&format!(" < {}", self.print(superclass)));
                }
                for method in methods {
                    out.push_str(&format!(" (method {})", method.name.lexeme));
                }
                out.push(')');
                out
            }

            Stmt::Expression(expr) => format!("(; {})", self.print(expr)),

            Stmt::Function(declaration) => {
                let params: Vec<&str> = declaration
                    .params
                    .iter()
                    .map(|p| p.lexeme.as_str())
                    .collect();
                let body: Vec<String> = declaration
                    .body
                    .iter()
                    .map(|s| self.print_stmt(s))
                    .collect();
                format!(
                    "(fun {} ({}) {})",
                    declaration.name.lexeme,
                    params.join(" "),
                    body.join(" ")
                )
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    self.print(condition),
                    self.print_stmt(then_branch),
                    self.print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    self.print(condition),
                    self.print_stmt(then_branch)
                ),
            },

            Stmt::Print(expr) => format!("(print {})", self.print(expr)),

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("(return {})", self.print(value)),
                None => "(return)".to_string(),
            },

            Stmt::Var { name, initializer } => match initializer {
                Some(initializer) => format!("(var {} {})", name.lexeme, self.print(initializer)),
                None => format!("(var {})", name.lexeme),
            },

            Stmt::While { condition, body } => {
                format!("(while {} {})", self.print(condition), self.print_stmt(body))
            }
        }
    }
}
