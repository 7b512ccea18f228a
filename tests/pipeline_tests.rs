//! End-to-end scenarios across the full pipeline: parse, filter, block
//! dispatch and code generation.

use sly::{
    BlockCompiler, Command, CompilerError, ExpressionContext, PluginCallInfo, compile_expression,
    parse_interpolation,
};
use sly_expression::{ExpressionNode, UnaryOperator};

#[test]
fn format_option_becomes_a_runtime_call() {
    let compiled = compile_expression(
        "${properties.title @ format='<b>%s</b>'}",
        ExpressionContext::Element,
    )
    .unwrap();

    assert_eq!(
        compiled.expression.root(),
        &ExpressionNode::runtime_call(
            "format",
            vec![
                ExpressionNode::identifier("properties.title"),
                ExpressionNode::StringConstant("<b>%s</b>".into()),
            ]
        )
    );
    assert!(!compiled.expression.contains_option("format"));
    assert!(compiled.warnings.is_empty());
    assert_eq!(
        compiled.source,
        "runtime.call(\"format\", properties.title, \"<b>%s</b>\")"
    );
}

#[test]
fn ternary_expression_compiles_end_to_end() {
    let compiled = compile_expression(
        "${visible ? title : fallback}",
        ExpressionContext::Text,
    )
    .unwrap();

    assert!(compiled.warnings.is_empty());
    assert_eq!(
        compiled.source,
        "(runtime.toBoolean(visible) ? title : fallback)"
    );
}

#[test]
fn uri_options_compile_into_one_runtime_call() {
    let compiled = compile_expression(
        "${page.path @ extension='html', fragment='top'}",
        ExpressionContext::Attribute,
    )
    .unwrap();

    assert!(compiled.warnings.is_empty());
    assert_eq!(
        compiled.source,
        "runtime.call(\"uriManipulation\", page.path, \
         runtime.map(\"extension\", \"html\", \"fragment\", \"top\"))"
    );
}

#[test]
fn list_block_emits_guarded_loop_with_default_item_name() {
    let mut compiler = BlockCompiler::with_builtins();
    let expression = parse_interpolation("${items}").unwrap();
    compiler
        .compile_block(
            "ul",
            &PluginCallInfo::new("list", vec![]),
            expression,
            |c| {
                c.output_text("<li/>");
                Ok(())
            },
        )
        .unwrap();
    let commands = compiler.into_stream().into_commands();

    // The stream opens with the list binding, the size binding and the
    // non-empty guard, in that order.
    let Command::VariableBindingStart { name: list_var, value } = &commands[0] else {
        panic!("expected list binding first, got {:?}", commands[0]);
    };
    assert_eq!(value, &ExpressionNode::identifier("items"));

    let Command::VariableBindingStart { name: size_var, value } = &commands[1] else {
        panic!("expected size binding second, got {:?}", commands[1]);
    };
    assert_eq!(
        value,
        &ExpressionNode::unary(
            UnaryOperator::Length,
            ExpressionNode::identifier(list_var)
        )
    );

    assert_eq!(
        commands[2],
        Command::ConditionalStart {
            variable: size_var.clone(),
            expected: true,
        }
    );

    // The loop iterates the bound list under the default item name.
    let loop_start = commands
        .iter()
        .find_map(|c| match c {
            Command::LoopStart { list_variable, item_variable, .. } => {
                Some((list_variable.clone(), item_variable.clone()))
            }
            _ => None,
        })
        .expect("loop start present");
    assert_eq!(loop_start.0, *list_var);
    assert_eq!(loop_start.1, "item");
}

#[test]
fn call_block_with_arguments_is_rejected() {
    let mut compiler = BlockCompiler::with_builtins();
    let expression = parse_interpolation("${lib.header}").unwrap();
    let err = compiler
        .compile_block(
            "div",
            &PluginCallInfo::new("call", vec!["extra".to_string()]),
            expression,
            |_| Ok(()),
        )
        .unwrap_err();
    assert!(matches!(err, CompilerError::Plugin { plugin, .. } if plugin == "call"));
}

#[test]
fn call_block_consumes_its_children() {
    let mut compiler = BlockCompiler::with_builtins();
    let expression = parse_interpolation("${lib.header @ title=pageTitle}").unwrap();
    compiler
        .compile_block(
            "div",
            &PluginCallInfo::new("call", vec![]),
            expression,
            |c| {
                c.output_text("fallback content");
                Ok(())
            },
        )
        .unwrap();
    let commands = compiler.into_stream().into_commands();

    let ignore_start = commands
        .iter()
        .position(|c| matches!(c, Command::StreamIgnoreStart))
        .expect("ignore start present");
    let ignore_end = commands
        .iter()
        .position(|c| matches!(c, Command::StreamIgnoreEnd))
        .expect("ignore end present");
    let child_text = commands
        .iter()
        .position(|c| matches!(c, Command::OutText { text } if text == "fallback content"))
        .expect("child text present");

    // The children land strictly inside the ignore region; nothing of
    // theirs reaches rendered output.
    assert!(ignore_start < child_text && child_text < ignore_end);

    // The procedure call itself precedes the ignored region.
    let call_pos = commands
        .iter()
        .position(|c| matches!(c, Command::ProcedureCall { .. }))
        .expect("procedure call present");
    assert!(call_pos < ignore_start);
}

#[test]
fn template_block_captures_children_as_a_procedure() {
    let mut compiler = BlockCompiler::with_builtins();
    let expression = parse_interpolation("${ignored @ title}").unwrap();
    compiler
        .compile_block(
            "div",
            &PluginCallInfo::new("template", vec!["header".to_string()]),
            expression,
            |c| {
                c.output_text("<h1>...</h1>");
                Ok(())
            },
        )
        .unwrap();
    let commands = compiler.into_stream().into_commands();

    let proc_start = commands
        .iter()
        .position(|c| {
            matches!(c, Command::ProcedureStart { name, parameters }
                if name == "header" && parameters == &["title".to_string()])
        })
        .expect("procedure start present");
    let proc_end = commands
        .iter()
        .position(|c| matches!(c, Command::ProcedureEnd))
        .expect("procedure end present");
    let body = commands
        .iter()
        .position(|c| matches!(c, Command::OutText { .. }))
        .expect("body present");
    assert!(proc_start < body && body < proc_end);
}

#[test]
fn escaping_is_outermost_in_generated_source() {
    let compiled = compile_expression(
        "${title @ format='%s!', context='html'}",
        ExpressionContext::Text,
    )
    .unwrap();
    assert!(compiled.source.starts_with("runtime.call(\"xss\""));
    assert!(compiled.source.contains("runtime.call(\"format\""));
}

#[test]
fn unknown_option_surfaces_as_a_warning() {
    let compiled = compile_expression("${title @ frobnicate=1}", ExpressionContext::Text).unwrap();
    assert_eq!(compiled.warnings.len(), 1);
    assert!(compiled.warnings[0].message.contains("frobnicate"));
}
