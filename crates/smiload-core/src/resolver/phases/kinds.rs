//! Phase 3: Node-kind inference.
//!
//! Infer each resolved definition's kind from its macro, SYNTAX and INDEX
//! clauses, then mark OBJECT-TYPEs directly under a row as columns.

use super::ResolveTracer;
use crate::ast::{Definition, MacroInvocation, MacroKind, SyntaxHead};
use crate::model::{NodeKind, Oid};
use crate::resolver::context::ResolverContext;
use alloc::collections::BTreeSet;

/// Infer node kinds for every resolved definition in `ctx`.
pub fn infer_kinds<TR: ResolveTracer>(ctx: &mut ResolverContext<'_>, tracer: &mut TR) {
    let ast = ctx.ast;

    // Type assignments of the form `Entry ::= SEQUENCE { ... }`
    let row_types: BTreeSet<&str> = ast
        .body
        .iter()
        .filter_map(|def| match def {
            Definition::TypeAssignment(t) if t.is_sequence => Some(t.name.name.as_str()),
            _ => None,
        })
        .collect();

    // First pass: everything except columns
    let mut rows: BTreeSet<&Oid> = BTreeSet::new();
    for (index, def) in ast.body.iter().enumerate() {
        let Some(oid) = ctx.oids[index].as_ref() else {
            continue;
        };
        let kind = match def {
            Definition::ValueAssignment(_) => NodeKind::Node,
            Definition::Macro(inv) => macro_kind(inv, &row_types),
            Definition::TypeAssignment(_) | Definition::MacroDefinition(_) => continue,
        };
        if kind == NodeKind::Row {
            rows.insert(oid);
        }
        ctx.kinds[index] = Some(kind);
    }

    // Second pass: scalars whose parent is a row are columns
    let mut columns = alloc::vec::Vec::new();
    for (index, kind) in ctx.kinds.iter().enumerate() {
        if *kind != Some(NodeKind::Scalar) {
            continue;
        }
        let parent = ctx.oids[index].as_ref().and_then(Oid::parent);
        if parent.is_some_and(|p| rows.contains(&p)) {
            columns.push(index);
        }
    }
    for index in columns {
        ctx.kinds[index] = Some(NodeKind::Column);
    }

    for (def, kind) in ast.body.iter().zip(&ctx.kinds) {
        if let Some(kind) = kind {
            tracer.kind(&def.name().name, *kind);
        }
    }
}

fn macro_kind(inv: &MacroInvocation, row_types: &BTreeSet<&str>) -> NodeKind {
    match inv.kind {
        MacroKind::ModuleIdentity | MacroKind::ObjectIdentity => NodeKind::Node,
        MacroKind::ObjectType => object_type_kind(inv, row_types),
        MacroKind::NotificationType | MacroKind::TrapType => NodeKind::Notification,
        MacroKind::ObjectGroup | MacroKind::NotificationGroup => NodeKind::Group,
        MacroKind::ModuleCompliance => NodeKind::Compliance,
        MacroKind::AgentCapabilities => NodeKind::Capabilities,
    }
}

fn object_type_kind(inv: &MacroInvocation, row_types: &BTreeSet<&str>) -> NodeKind {
    match &inv.syntax {
        Some(SyntaxHead::SequenceOf(_)) => NodeKind::Table,
        _ if inv.has_index || inv.has_augments => NodeKind::Row,
        Some(SyntaxHead::TypeRef(t)) if row_types.contains(t.name.as_str()) => NodeKind::Row,
        _ => NodeKind::Scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::phases::{resolve_imports, resolve_oids, NoopResolveTracer};
    use crate::resolver::NoImports;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn kinds(source: &str) -> Vec<(String, Option<NodeKind>)> {
        let parsed = Parser::new(source.as_bytes()).parse();
        assert!(!parsed.has_errors(), "{:?}", parsed.diagnostics);
        let ast = &parsed.modules[0];
        let mut ctx = ResolverContext::new(ast, &NoImports);
        resolve_imports(&mut ctx, &mut NoopResolveTracer);
        resolve_oids(&mut ctx, &mut NoopResolveTracer);
        infer_kinds(&mut ctx, &mut NoopResolveTracer);
        ast.body
            .iter()
            .zip(&ctx.kinds)
            .map(|(def, kind)| (def.name().name.clone(), *kind))
            .collect()
    }

    fn kind_of(kinds: &[(String, Option<NodeKind>)], name: &str) -> Option<NodeKind> {
        kinds.iter().find(|(n, _)| n == name).and_then(|(_, k)| *k)
    }

    #[test]
    fn test_table_row_column_scalar() {
        let k = kinds(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            root OBJECT IDENTIFIER ::= { iso 9 }
            tTable OBJECT-TYPE SYNTAX SEQUENCE OF TEntry
                MAX-ACCESS not-accessible STATUS current DESCRIPTION "t"
                ::= { root 1 }
            tEntry OBJECT-TYPE SYNTAX TEntry
                MAX-ACCESS not-accessible STATUS current DESCRIPTION "r"
                INDEX { tIndex }
                ::= { tTable 1 }
            tIndex OBJECT-TYPE SYNTAX Integer32
                MAX-ACCESS read-only STATUS current DESCRIPTION "c"
                ::= { tEntry 1 }
            tCount OBJECT-TYPE SYNTAX Integer32
                MAX-ACCESS read-only STATUS current DESCRIPTION "s"
                ::= { root 2 }
            TEntry ::= SEQUENCE { tIndex Integer32 }
            END"#,
        );
        assert_eq!(kind_of(&k, "root"), Some(NodeKind::Node));
        assert_eq!(kind_of(&k, "tTable"), Some(NodeKind::Table));
        assert_eq!(kind_of(&k, "tEntry"), Some(NodeKind::Row));
        assert_eq!(kind_of(&k, "tIndex"), Some(NodeKind::Column));
        assert_eq!(kind_of(&k, "tCount"), Some(NodeKind::Scalar));
        assert_eq!(kind_of(&k, "TEntry"), None);
    }

    #[test]
    fn test_row_by_sequence_type_without_index() {
        let k = kinds(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            xEntry OBJECT-TYPE SYNTAX XEntry ACCESS not-accessible STATUS mandatory
                ::= { iso 1 }
            xCol OBJECT-TYPE SYNTAX INTEGER ACCESS read-only STATUS mandatory
                ::= { xEntry 1 }
            XEntry ::= SEQUENCE { xCol INTEGER }
            END"#,
        );
        assert_eq!(kind_of(&k, "xEntry"), Some(NodeKind::Row));
        assert_eq!(kind_of(&k, "xCol"), Some(NodeKind::Column));
    }

    #[test]
    fn test_augments_row_and_conformance() {
        let k = kinds(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            aEntry OBJECT-TYPE SYNTAX AEntry MAX-ACCESS not-accessible
                STATUS current DESCRIPTION "r" AUGMENTS { otherEntry }
                ::= { iso 2 }
            aNotif NOTIFICATION-TYPE OBJECTS { aEntry } STATUS current
                DESCRIPTION "n" ::= { iso 3 }
            aGroup OBJECT-GROUP OBJECTS { aEntry } STATUS current
                DESCRIPTION "g" ::= { iso 4 }
            aCompl MODULE-COMPLIANCE STATUS current DESCRIPTION "c"
                MODULE MANDATORY-GROUPS { aGroup } ::= { iso 5 }
            aCaps AGENT-CAPABILITIES PRODUCT-RELEASE "1" STATUS current
                DESCRIPTION "a" ::= { iso 6 }
            aId OBJECT-IDENTITY STATUS current DESCRIPTION "i" ::= { iso 7 }
            END"#,
        );
        assert_eq!(kind_of(&k, "aEntry"), Some(NodeKind::Row));
        assert_eq!(kind_of(&k, "aNotif"), Some(NodeKind::Notification));
        assert_eq!(kind_of(&k, "aGroup"), Some(NodeKind::Group));
        assert_eq!(kind_of(&k, "aCompl"), Some(NodeKind::Compliance));
        assert_eq!(kind_of(&k, "aCaps"), Some(NodeKind::Capabilities));
        assert_eq!(kind_of(&k, "aId"), Some(NodeKind::Node));
    }
}
