use flowspec::{
    generate_argument, generate_sink, generate_source, parse_argument, parse_sink, parse_source,
};
use proptest::prelude::*;

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,8}"
}

fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..u32::MAX).prop_map(|n| format!("0x{n:X}")),
        ("[0-9]{0,3}", "[0-9]{1,3}").prop_map(|(whole, frac)| format!("{whole}.{frac}")),
        "[a-zA-Z0-9 /._-]{0,10}".prop_map(|s| format!("\"{s}\"")),
        Just(r#""esc \"q\" \\ \n""#.to_string()),
    ]
}

/// Argument text as it appears inside a call, nested calls unpadded
fn arb_args(depth: u32) -> BoxedStrategy<Vec<String>> {
    (
        prop::collection::vec(arb_value(depth), 0..3),
        prop::collection::vec((arb_ident(), arb_value(depth)), 0..3),
    )
        .prop_map(|(positional, keyword)| {
            positional
                .into_iter()
                .chain(keyword.into_iter().map(|(k, v)| format!("{k}={v}")))
                .collect()
        })
        .boxed()
}

fn arb_value(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_literal().boxed();
    }
    let nested = (arb_ident(), arb_args(depth - 1))
        .prop_map(|(name, args)| format!("{name}({})", args.join(", ")));
    prop_oneof![arb_literal(), nested].boxed()
}

/// Padded call, as written for sources, sinks, decorators and block headers
fn arb_top_call() -> impl Strategy<Value = String> {
    (arb_ident(), arb_args(2)).prop_map(|(name, args)| {
        if args.is_empty() {
            format!("{name}()")
        } else {
            format!("{name}( {} )", args.join(", "))
        }
    })
}

fn arb_source() -> impl Strategy<Value = String> {
    prop_oneof![arb_ident(), arb_top_call()]
}

fn arb_sink(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_source().boxed();
    }

    let decorated = (arb_source(), arb_sink(depth - 1))
        .prop_map(|(decorator, child)| format!("{{ {decorator} => {child} }}"));
    let multi = prop::collection::vec(arb_sink(depth - 1), 1..4)
        .prop_map(|children| format!("[ {} ]", children.join(", ")));
    let failover = (arb_sink(depth - 1), arb_sink(depth - 1))
        .prop_map(|(primary, backup)| format!("< {primary} ? {backup} >"));
    let block = (arb_top_call(), arb_sink(depth - 1))
        .prop_map(|(header, child)| format!("{header} {{ {child} }}"));

    prop_oneof![arb_source(), decorated, multi, failover, block].boxed()
}

proptest! {
    #[test]
    fn sink_round_trip(text in arb_sink(3)) {
        let parsed = parse_sink(&text).expect("generated sink should parse");
        prop_assert_eq!(generate_sink(&parsed), text);
    }

    #[test]
    fn source_round_trip(text in arb_source()) {
        let parsed = parse_source(&text).expect("generated source should parse");
        prop_assert_eq!(generate_source(&parsed), text);
    }

    #[test]
    fn argument_round_trip(text in arb_value(2)) {
        let parsed = parse_argument(&text).expect("generated argument should parse");
        prop_assert_eq!(generate_argument(&parsed), text);
    }

    #[test]
    fn generation_is_fixed_point(text in arb_sink(3)) {
        // squeeze out the canonical spacing, then regenerate twice
        let squeezed = text.replace(" => ", "=>").replace("( ", "(").replace(" )", ")");
        let once = generate_sink(&parse_sink(&squeezed).expect("squeezed sink should parse"));
        let twice = generate_sink(&parse_sink(&once).expect("generated sink should reparse"));
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, text);
    }
}
