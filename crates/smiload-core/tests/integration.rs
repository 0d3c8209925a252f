//! End-to-end tests: source text through parser and resolver.

use smiload_core::lexer::LineIndex;
use smiload_core::model::{Language, NodeKind, NodeKinds};
use smiload_core::{resolve_module, Module, NoImports, Parser};
use std::collections::{BTreeMap, BTreeSet};

const IF_MIB_EXCERPT: &str = r#"
IF-MIB DEFINITIONS ::= BEGIN

IMPORTS
    MODULE-IDENTITY, OBJECT-TYPE, Counter32, Gauge32, Integer32,
    TimeTicks, mib-2, NOTIFICATION-TYPE      FROM SNMPv2-SMI
    TEXTUAL-CONVENTION, DisplayString,
    PhysAddress, TruthValue, RowStatus       FROM SNMPv2-TC
    MODULE-COMPLIANCE, OBJECT-GROUP,
    NOTIFICATION-GROUP                       FROM SNMPv2-CONF;

ifMIB MODULE-IDENTITY
    LAST-UPDATED "200006140000Z"
    ORGANIZATION "IETF Interfaces MIB Working Group"
    CONTACT-INFO "   Keith McCloghrie"
    DESCRIPTION
            "The MIB module to describe generic objects for network
            interface sub-layers."
    REVISION      "200006140000Z"
    DESCRIPTION
            "Clarifications agreed upon by the Interfaces MIB WG."
    ::= { mib-2 31 }

ifMIBObjects OBJECT IDENTIFIER ::= { ifMIB 1 }

interfaces   OBJECT IDENTIFIER ::= { mib-2 2 }

InterfaceIndex ::= TEXTUAL-CONVENTION
    DISPLAY-HINT "d"
    STATUS       current
    DESCRIPTION
            "A unique value, greater than zero, for each interface."
    SYNTAX       Integer32 (1..2147483647)

ifNumber  OBJECT-TYPE
    SYNTAX      Integer32
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION
            "The number of network interfaces."
    ::= { interfaces 1 }

ifTable OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION
            "A list of interface entries."
    ::= { interfaces 2 }

ifEntry OBJECT-TYPE
    SYNTAX      IfEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION
            "An entry containing management information."
    INDEX   { ifIndex }
    ::= { ifTable 1 }

IfEntry ::=
    SEQUENCE {
        ifIndex                 InterfaceIndex,
        ifDescr                 DisplayString,
        ifType                  INTEGER,
        ifAdminStatus           INTEGER
    }

ifIndex OBJECT-TYPE
    SYNTAX      InterfaceIndex
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION
            "A unique value, greater than zero, for each interface."
    ::= { ifEntry 1 }

ifDescr OBJECT-TYPE
    SYNTAX      DisplayString (SIZE (0..255))
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION
            "A textual string containing information about the
            interface."
    ::= { ifEntry 2 }

ifType OBJECT-TYPE
    SYNTAX      INTEGER { other(1), ethernetCsmacd(6) }
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION
            "The type of interface."
    ::= { ifEntry 3 }

ifAdminStatus OBJECT-TYPE
    SYNTAX  INTEGER {
                up(1),       -- ready to pass packets
                down(2),
                testing(3)   -- in some test mode
            }
    MAX-ACCESS  read-write
    STATUS      current
    DESCRIPTION
            "The desired state of the interface."
    DEFVAL  { up }
    ::= { ifEntry 7 }

ifXTable        OBJECT-TYPE
    SYNTAX      SEQUENCE OF IfXEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION
            "A list of interface entries."
    ::= { ifMIBObjects 1 }

ifXEntry        OBJECT-TYPE
    SYNTAX      IfXEntry
    MAX-ACCESS  not-accessible
    STATUS      current
    DESCRIPTION
            "An entry containing additional management information."
    AUGMENTS    { ifEntry }
    ::= { ifXTable 1 }

IfXEntry ::=
    SEQUENCE {
        ifName                  DisplayString
    }

ifName OBJECT-TYPE
    SYNTAX      DisplayString
    MAX-ACCESS  read-only
    STATUS      current
    DESCRIPTION
            "The textual name of the interface."
    ::= { ifXEntry 1 }

linkDown NOTIFICATION-TYPE
    OBJECTS { ifIndex, ifAdminStatus }
    STATUS  current
    DESCRIPTION
            "A linkDown trap signifies that the SNMP entity has detected
            that the ifOperStatus object is about to enter the down state."
    ::= { snmpTraps 3 }

snmpTraps OBJECT IDENTIFIER ::= { iso org(3) dod(6) internet(1) snmpV2(6) 3 1 1 5 }

ifConformance   OBJECT IDENTIFIER ::= { ifMIB 2 }
ifGroups        OBJECT IDENTIFIER ::= { ifConformance 1 }
ifCompliances   OBJECT IDENTIFIER ::= { ifConformance 2 }

ifGeneralGroup    OBJECT-GROUP
    OBJECTS { ifDescr, ifType, ifAdminStatus, ifName }
    STATUS  current
    DESCRIPTION
            "A collection of objects providing information applicable to
            all network interfaces."
    ::= { ifGroups 10 }

linkUpDownNotificationsGroup  NOTIFICATION-GROUP
    NOTIFICATIONS { linkDown }
    STATUS  current
    DESCRIPTION
            "The notifications which indicate specific changes in the
            value of ifOperStatus."
    ::= { ifGroups 14 }

ifCompliance3 MODULE-COMPLIANCE
    STATUS      current
    DESCRIPTION
            "The compliance statement for SNMP entities which have
            network interfaces."
    MODULE  -- this module
        MANDATORY-GROUPS { ifGeneralGroup, linkUpDownNotificationsGroup }
        OBJECT       ifAdminStatus
        SYNTAX       INTEGER { up(1), down(2) }
        MIN-ACCESS   read-only
        DESCRIPTION
            "Write access is not required."
    ::= { ifCompliances 3 }

END
"#;

const RFC1213_EXCERPT: &str = r#"
RFC1213-MIB DEFINITIONS ::= BEGIN

IMPORTS
        mgmt, NetworkAddress, IpAddress, Counter, Gauge, TimeTicks
            FROM RFC1155-SMI
        OBJECT-TYPE
            FROM RFC-1212
        TRAP-TYPE
            FROM RFC-1215;

mib-2      OBJECT IDENTIFIER ::= { mgmt 1 }

DisplayString ::= OCTET STRING

system       OBJECT IDENTIFIER ::= { mib-2 1 }
snmp         OBJECT IDENTIFIER ::= { mib-2 11 }

sysDescr OBJECT-TYPE
    SYNTAX  DisplayString (SIZE (0..255))
    ACCESS  read-only
    STATUS  mandatory
    DESCRIPTION
            "A textual description of the entity."
    ::= { system 1 }

coldStart TRAP-TYPE
    ENTERPRISE  snmp
    DESCRIPTION
            "A coldStart trap signifies that the sending protocol entity
            is reinitializing itself."
    ::= 0

END
"#;

fn load(source: &str) -> Module {
    let parsed = Parser::new(source.as_bytes()).parse();
    assert!(
        !parsed.has_errors(),
        "unexpected diagnostics: {:?}",
        parsed.diagnostics
    );
    assert_eq!(parsed.modules.len(), 1);
    resolve_module(&parsed.modules[0], &NoImports)
}

#[test]
fn test_if_mib_directory() {
    let module = load(IF_MIB_EXCERPT);
    assert_eq!(module.name(), "IF-MIB");
    assert_eq!(module.language(), Language::Smiv2);
    assert!(module.unresolved().is_empty(), "{:?}", module.unresolved());

    let dir = module.oid_directory();
    let expected: BTreeMap<&str, &str> = [
        ("ifMIB", "1.3.6.1.2.1.31"),
        ("ifMIBObjects", "1.3.6.1.2.1.31.1"),
        ("interfaces", "1.3.6.1.2.1.2"),
        ("ifNumber", "1.3.6.1.2.1.2.1"),
        ("ifTable", "1.3.6.1.2.1.2.2"),
        ("ifEntry", "1.3.6.1.2.1.2.2.1"),
        ("ifIndex", "1.3.6.1.2.1.2.2.1.1"),
        ("ifDescr", "1.3.6.1.2.1.2.2.1.2"),
        ("ifType", "1.3.6.1.2.1.2.2.1.3"),
        ("ifAdminStatus", "1.3.6.1.2.1.2.2.1.7"),
        ("ifXTable", "1.3.6.1.2.1.31.1.1"),
        ("ifXEntry", "1.3.6.1.2.1.31.1.1.1"),
        ("ifName", "1.3.6.1.2.1.31.1.1.1.1"),
        ("linkDown", "1.3.6.1.6.3.1.1.5.3"),
        ("snmpTraps", "1.3.6.1.6.3.1.1.5"),
        ("ifConformance", "1.3.6.1.2.1.31.2"),
        ("ifGroups", "1.3.6.1.2.1.31.2.1"),
        ("ifCompliances", "1.3.6.1.2.1.31.2.2"),
    ]
    .into_iter()
    .collect();
    let actual: BTreeMap<&str, &str> = dir.iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_if_mib_kinds() {
    let module = load(IF_MIB_EXCERPT);
    let kind = |name: &str| module.node(name).map(|n| n.kind);

    assert_eq!(kind("ifMIB"), Some(NodeKind::Node));
    assert_eq!(kind("ifNumber"), Some(NodeKind::Scalar));
    assert_eq!(kind("ifTable"), Some(NodeKind::Table));
    assert_eq!(kind("ifEntry"), Some(NodeKind::Row));
    assert_eq!(kind("ifXEntry"), Some(NodeKind::Row));
    assert_eq!(kind("ifIndex"), Some(NodeKind::Column));
    assert_eq!(kind("ifName"), Some(NodeKind::Column));
    assert_eq!(kind("linkDown"), Some(NodeKind::Notification));
    assert_eq!(kind("ifGeneralGroup"), Some(NodeKind::Group));
    assert_eq!(kind("ifCompliance3"), Some(NodeKind::Compliance));
    assert_eq!(kind("InterfaceIndex"), None);
    assert_eq!(kind("IfEntry"), None);

    let conformance: BTreeSet<&str> = module
        .nodes_of(NodeKinds::GROUP | NodeKinds::COMPLIANCE)
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(
        conformance,
        BTreeSet::from([
            "ifGeneralGroup",
            "linkUpDownNotificationsGroup",
            "ifCompliance3"
        ])
    );
}

#[test]
fn test_smiv1_module_with_trap() {
    let module = load(RFC1213_EXCERPT);
    assert_eq!(module.language(), Language::Smiv1);

    let dir = module.oid_directory();
    assert_eq!(dir.get("mib-2"), Some("1.3.6.1.2.1"));
    assert_eq!(dir.get("sysDescr"), Some("1.3.6.1.2.1.1.1"));
    assert_eq!(dir.get("coldStart"), Some("1.3.6.1.2.1.11.0.0"));
    assert!(!dir.contains("DisplayString"));
    assert_eq!(
        module.node("coldStart").map(|n| n.kind),
        Some(NodeKind::Notification)
    );
}

#[test]
fn test_import_from_resolved_module() {
    let rfc1213 = load(RFC1213_EXCERPT);
    let registry = BTreeMap::from([(rfc1213.name().to_string(), rfc1213)]);

    let parsed = Parser::new(
        b"HOST-MIB DEFINITIONS ::= BEGIN
          IMPORTS system FROM RFC1213-MIB;
          hostThing OBJECT IDENTIFIER ::= { system 99 }
          END",
    )
    .parse();
    let module = resolve_module(&parsed.modules[0], &registry);
    assert_eq!(
        module.oid_directory().get("hostThing"),
        Some("1.3.6.1.2.1.1.99")
    );
}

#[test]
fn test_syntax_error_position() {
    let source = "BROKEN-MIB DEFINITIONS ::= BEGIN\n  x OBJECT IDENTIFIER ::= { iso ; }\nEND\n";
    let parsed = Parser::new(source.as_bytes()).parse();
    let error = parsed.first_error().expect("syntax error expected");
    let (line, _col) = LineIndex::new(source.as_bytes()).line_col(error.span.start);
    assert_eq!(line, 2);
}

#[test]
fn test_redefined_name_resolves_to_last() {
    let module = load(
        "DUP-MIB DEFINITIONS ::= BEGIN
         x OBJECT IDENTIFIER ::= { iso 1 }
         y OBJECT IDENTIFIER ::= { iso 5 }
         x OBJECT IDENTIFIER ::= { iso 2 }
         END",
    );
    let node = module.node("x").unwrap();
    assert_eq!(node.oid.to_string(), "1.2");
    assert_eq!(module.oid_directory().get("x"), Some("1.2"));
    assert_eq!(module.oid_directory().len(), 2);
}

#[cfg(feature = "tracing")]
mod traced {
    use super::*;
    use smiload_core::resolver::resolve_module_traced;
    use smiload_core::resolver::tracing::{TraceEvent, TraceLevel, Tracer};

    #[derive(Default)]
    struct Collect {
        unresolved: Vec<String>,
        phases: usize,
    }

    impl Tracer for Collect {
        fn level(&self) -> TraceLevel {
            TraceLevel::Trace
        }

        fn trace(&mut self, _level: TraceLevel, event: TraceEvent<'_>) {
            match event {
                TraceEvent::OidUnresolved { def_name, .. } => {
                    self.unresolved.push(def_name.to_string());
                }
                TraceEvent::PhaseEnd { .. } => self.phases += 1,
                _ => {}
            }
        }
    }

    #[test]
    fn test_tracer_sees_unresolved() {
        let parsed = Parser::new(
            b"T-MIB DEFINITIONS ::= BEGIN
              lost OBJECT IDENTIFIER ::= { nowhere 1 }
              END",
        )
        .parse();
        let mut tracer = Collect::default();
        let module = resolve_module_traced(&parsed.modules[0], &NoImports, &mut tracer);
        assert!(module.nodes().is_empty());
        assert_eq!(tracer.unresolved, ["lost"]);
        assert_eq!(tracer.phases, 3);
    }
}
