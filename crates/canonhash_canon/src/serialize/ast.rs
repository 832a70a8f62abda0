//! Rendering of structural ASTs.
//!
//! Each node is `Tag(field,...)` with its fields in declaration order.
//! Names and string literals are JSON strings, lists are `[...]` and absent
//! optional children (array holes included) are `null`. A binding pattern
//! that is a plain identifier renders as its bare name.

use canonhash_ir::ast::{
    ArrowBody, ArrowFunction, CatchClause, Declarator, Expr, ForHead, ForInit, Function, Param,
    Pattern, PatternProp, PropKey, Property, Stmt, SwitchCase, VarDecl,
};
use canonhash_ir::StructuralAst;
use canonhash_stack::ensure_sufficient_stack;

use super::{write_bool, write_number, write_string};

pub(super) fn write_ast(ast: &StructuralAst, out: &mut String) {
    let mut writer = AstWriter { out };
    match ast {
        StructuralAst::Function(function) => writer.function(function),
        StructuralAst::Arrow(arrow) => writer.arrow(arrow),
    }
}

struct AstWriter<'o> {
    out: &'o mut String,
}

impl AstWriter<'_> {
    fn open(&mut self, tag: &str) {
        self.out.push_str(tag);
        self.out.push('(');
    }

    fn sep(&mut self) {
        self.out.push(',');
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    /// A node with no fields.
    fn leaf(&mut self, tag: &str) {
        self.open(tag);
        self.close();
    }

    fn name(&mut self, name: &str) {
        write_string(name, self.out);
    }

    fn opt_name(&mut self, name: Option<&str>) {
        match name {
            Some(name) => self.name(name),
            None => self.null(),
        }
    }

    fn null(&mut self) {
        self.out.push_str("null");
    }

    fn flag(&mut self, value: bool) {
        write_bool(value, self.out);
    }

    fn list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.out.push('[');
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.sep();
            }
            each(self, item);
        }
        self.out.push(']');
    }

    fn opt_expr(&mut self, expr: Option<&Expr>) {
        match expr {
            Some(expr) => self.expr(expr),
            None => self.null(),
        }
    }

    fn stmts(&mut self, body: &[Stmt]) {
        self.list(body, Self::stmt);
    }

    fn exprs(&mut self, exprs: &[Expr]) {
        self.list(exprs, Self::expr);
    }

    fn names(&mut self, names: &[String]) {
        self.list(names, |writer, name| writer.name(name));
    }

    /// Template text chunks followed by the substitutions between them.
    fn template(&mut self, quasis: &[String], exprs: &[Expr]) {
        self.names(quasis);
        self.sep();
        self.exprs(exprs);
    }

    /// A `?.` link gets its own tag so `a?.b` and `a.b` stay distinct.
    fn link(&mut self, tag: &str, optional: bool) {
        if optional {
            self.out.push_str("Opt");
        }
        self.open(tag);
    }

    fn pattern(&mut self, pattern: &Pattern) {
        ensure_sufficient_stack(|| self.pattern_inner(pattern));
    }

    fn pattern_inner(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(name) => self.name(name),
            Pattern::Object(props) => {
                self.open("ObjPat");
                self.list(props, Self::pattern_prop);
                self.close();
            }
            Pattern::Array(elements) => {
                self.open("ArrPat");
                self.list(elements, |writer, element| match element {
                    Some(element) => writer.pattern(element),
                    None => writer.null(),
                });
                self.close();
            }
            Pattern::Default { target, default } => {
                self.open("Default");
                self.pattern(target);
                self.sep();
                self.expr(default);
                self.close();
            }
            Pattern::Rest(target) => {
                self.open("Rest");
                self.pattern(target);
                self.close();
            }
            Pattern::Expr(expr) => self.expr(expr),
        }
    }

    fn pattern_prop(&mut self, prop: &PatternProp) {
        match prop {
            PatternProp::Entry { key, value } => {
                self.open("PatProp");
                self.prop_key(key);
                self.sep();
                self.pattern(value);
                self.close();
            }
            PatternProp::Rest(target) => {
                self.open("Rest");
                self.pattern(target);
                self.close();
            }
        }
    }

    fn function(&mut self, function: &Function) {
        self.open("Function");
        self.opt_name(function.name.as_deref());
        self.sep();
        self.list(&function.params, Self::param);
        self.sep();
        self.stmts(&function.body);
        self.sep();
        self.flag(function.is_async);
        self.sep();
        self.flag(function.is_generator);
        self.close();
    }

    fn arrow(&mut self, arrow: &ArrowFunction) {
        self.open("Arrow");
        self.list(&arrow.params, Self::param);
        self.sep();
        match &arrow.body {
            ArrowBody::Expr(expr) => {
                self.open("ExprBody");
                self.expr(expr);
                self.close();
            }
            ArrowBody::Block(body) => {
                self.open("BlockBody");
                self.stmts(body);
                self.close();
            }
        }
        self.sep();
        self.flag(arrow.is_async);
        self.close();
    }

    fn param(&mut self, param: &Param) {
        self.open("Param");
        self.pattern(&param.target);
        self.sep();
        self.opt_expr(param.default.as_ref());
        self.sep();
        self.flag(param.rest);
        self.close();
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.open("VarDecl");
        self.name(decl.kind.as_str());
        self.sep();
        self.list(&decl.declarators, Self::declarator);
        self.close();
    }

    fn declarator(&mut self, declarator: &Declarator) {
        self.open("Declarator");
        self.pattern(&declarator.target);
        self.sep();
        self.opt_expr(declarator.init.as_ref());
        self.close();
    }

    fn for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Decl(kind, target) => {
                self.open("Decl");
                self.name(kind.as_str());
                self.sep();
                self.pattern(target);
                self.close();
            }
            ForHead::Target(target) => self.pattern(target),
        }
    }

    fn catch_clause(&mut self, clause: &CatchClause) {
        self.open("Catch");
        match &clause.param {
            Some(param) => self.pattern(param),
            None => self.null(),
        }
        self.sep();
        self.stmts(&clause.body);
        self.close();
    }

    fn switch_case(&mut self, case: &SwitchCase) {
        self.open("Case");
        self.opt_expr(case.test.as_ref());
        self.sep();
        self.stmts(&case.body);
        self.close();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| self.stmt_inner(stmt));
    }

    fn stmt_inner(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                self.open("ExprStmt");
                self.expr(expr);
                self.close();
            }
            Stmt::VarDecl(decl) => self.var_decl(decl),
            Stmt::FunctionDecl(function) => {
                self.open("FunctionDecl");
                self.function(function);
                self.close();
            }
            Stmt::Return(argument) => {
                self.open("Return");
                self.opt_expr(argument.as_ref());
                self.close();
            }
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.open("If");
                self.expr(test);
                self.sep();
                self.stmt(consequent);
                self.sep();
                match alternate {
                    Some(alternate) => self.stmt(alternate),
                    None => self.null(),
                }
                self.close();
            }
            Stmt::Block(body) => {
                self.open("Block");
                self.stmts(body);
                self.close();
            }
            Stmt::While { test, body } => {
                self.open("While");
                self.expr(test);
                self.sep();
                self.stmt(body);
                self.close();
            }
            Stmt::DoWhile { body, test } => {
                self.open("DoWhile");
                self.stmt(body);
                self.sep();
                self.expr(test);
                self.close();
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                self.open("For");
                match init {
                    Some(ForInit::Decl(decl)) => self.var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.expr(expr),
                    None => self.null(),
                }
                self.sep();
                self.opt_expr(test.as_ref());
                self.sep();
                self.opt_expr(update.as_ref());
                self.sep();
                self.stmt(body);
                self.close();
            }
            Stmt::ForIn { head, object, body } => {
                self.open("ForIn");
                self.for_head(head);
                self.sep();
                self.expr(object);
                self.sep();
                self.stmt(body);
                self.close();
            }
            Stmt::ForOf {
                head,
                iterable,
                body,
            } => {
                self.open("ForOf");
                self.for_head(head);
                self.sep();
                self.expr(iterable);
                self.sep();
                self.stmt(body);
                self.close();
            }
            Stmt::Break(label) => {
                self.open("Break");
                self.opt_name(label.as_deref());
                self.close();
            }
            Stmt::Continue(label) => {
                self.open("Continue");
                self.opt_name(label.as_deref());
                self.close();
            }
            Stmt::Throw(argument) => {
                self.open("Throw");
                self.expr(argument);
                self.close();
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.open("Try");
                self.stmts(block);
                self.sep();
                match handler {
                    Some(clause) => self.catch_clause(clause),
                    None => self.null(),
                }
                self.sep();
                match finalizer {
                    Some(body) => self.stmts(body),
                    None => self.null(),
                }
                self.close();
            }
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                self.open("Switch");
                self.expr(discriminant);
                self.sep();
                self.list(cases, Self::switch_case);
                self.close();
            }
            Stmt::Labeled { label, body } => {
                self.open("Labeled");
                self.name(label);
                self.sep();
                self.stmt(body);
                self.close();
            }
            Stmt::Empty => self.leaf("Empty"),
        }
    }

    fn prop_key(&mut self, key: &PropKey) {
        match key {
            PropKey::Named(name) => {
                self.open("Key");
                self.name(name);
                self.close();
            }
            PropKey::Number(value) => {
                self.open("NumKey");
                write_number(*value, self.out);
                self.close();
            }
            PropKey::Computed(expr) => {
                self.open("Computed");
                self.expr(expr);
                self.close();
            }
        }
    }

    fn property(&mut self, property: &Property) {
        match property {
            Property::Init { key, value } => {
                self.open("Init");
                self.prop_key(key);
                self.sep();
                self.expr(value);
                self.close();
            }
            Property::Shorthand(name) => {
                self.open("Shorthand");
                self.name(name);
                self.close();
            }
            Property::Method { key, function } => {
                self.open("Method");
                self.prop_key(key);
                self.sep();
                self.function(function);
                self.close();
            }
            Property::Getter { key, function } => {
                self.open("Getter");
                self.prop_key(key);
                self.sep();
                self.function(function);
                self.close();
            }
            Property::Setter { key, function } => {
                self.open("Setter");
                self.prop_key(key);
                self.sep();
                self.function(function);
                self.close();
            }
            Property::Spread(expr) => {
                self.open("Spread");
                self.expr(expr);
                self.close();
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| self.expr_inner(expr));
    }

    fn expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Number(value) => {
                self.open("Num");
                write_number(*value, self.out);
                self.close();
            }
            Expr::Str(value) => {
                self.open("Str");
                self.name(value);
                self.close();
            }
            Expr::Bool(value) => {
                self.open("Bool");
                self.flag(*value);
                self.close();
            }
            Expr::Null => self.leaf("Null"),
            Expr::BigInt(digits) => {
                self.open("BigInt");
                self.name(digits);
                self.close();
            }
            Expr::Regex { pattern, flags } => {
                self.open("Regex");
                self.name(pattern);
                self.sep();
                self.name(flags);
                self.close();
            }
            Expr::Template { quasis, exprs } => {
                self.open("Template");
                self.template(quasis, exprs);
                self.close();
            }
            Expr::TaggedTemplate { tag, quasis, exprs } => {
                self.open("Tagged");
                self.expr(tag);
                self.sep();
                self.template(quasis, exprs);
                self.close();
            }
            Expr::Ident(name) => {
                self.open("Ident");
                self.name(name);
                self.close();
            }
            Expr::This => self.leaf("This"),
            Expr::Array(elements) => {
                self.open("Array");
                self.list(elements, |writer, element| writer.opt_expr(element.as_ref()));
                self.close();
            }
            Expr::Object(properties) => {
                self.open("Object");
                self.list(properties, Self::property);
                self.close();
            }
            Expr::Function(function) => self.function(function),
            Expr::Arrow(arrow) => self.arrow(arrow),
            Expr::Unary { op, operand } => {
                self.open("Unary");
                self.name(op.as_str());
                self.sep();
                self.expr(operand);
                self.close();
            }
            Expr::Update { op, prefix, target } => {
                self.open("Update");
                self.name(op.as_str());
                self.sep();
                self.flag(*prefix);
                self.sep();
                self.expr(target);
                self.close();
            }
            Expr::Binary { op, left, right } => {
                self.open("Binary");
                self.name(op.as_str());
                self.sep();
                self.expr(left);
                self.sep();
                self.expr(right);
                self.close();
            }
            Expr::Assign { op, target, value } => {
                self.open("Assign");
                self.name(op.as_str());
                self.sep();
                self.pattern(target);
                self.sep();
                self.expr(value);
                self.close();
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.open("Cond");
                self.expr(test);
                self.sep();
                self.expr(consequent);
                self.sep();
                self.expr(alternate);
                self.close();
            }
            Expr::Call {
                callee,
                args,
                optional,
            } => {
                self.link("Call", *optional);
                self.expr(callee);
                self.sep();
                self.exprs(args);
                self.close();
            }
            Expr::New { callee, args } => {
                self.open("New");
                self.expr(callee);
                self.sep();
                self.exprs(args);
                self.close();
            }
            Expr::Member {
                object,
                property,
                optional,
            } => {
                self.link("Member", *optional);
                self.expr(object);
                self.sep();
                self.name(property);
                self.close();
            }
            Expr::Index {
                object,
                index,
                optional,
            } => {
                self.link("Index", *optional);
                self.expr(object);
                self.sep();
                self.expr(index);
                self.close();
            }
            Expr::Chain(expr) => {
                self.open("Chain");
                self.expr(expr);
                self.close();
            }
            Expr::Sequence(exprs) => {
                self.open("Seq");
                self.exprs(exprs);
                self.close();
            }
            Expr::Spread(expr) => {
                self.open("Spread");
                self.expr(expr);
                self.close();
            }
            Expr::Yield { argument, delegate } => {
                self.open("Yield");
                self.opt_expr(argument.as_deref());
                self.sep();
                self.flag(*delegate);
                self.close();
            }
        }
    }
}
