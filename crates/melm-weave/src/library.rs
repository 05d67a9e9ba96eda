//! Built-in weave scripts for elm-format composite modules.
//!
//! Each script narrows to one top-level declaration and then anchors on the
//! last line of the construct that receives the new wiring: the last import,
//! the closing brace of a record, the last union variant, the last case
//! branch, or the closing bracket of a list.
//!
//! Declarations are separated by two blank lines. A single blank line, such
//! as one between `let` bindings or case branches, stays inside the block.

use crate::inserter::Placement;
use crate::script::{MatchSpec, ScriptTable, WeaveScript};

/// Script names in invocation order.
pub const SCRIPT_ORDER: [&str; 7] = [
    "import",
    "model",
    "init",
    "msg",
    "update",
    "subscriptions",
    "view",
];

/// How the host module threads a sub-component's update results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateVariant {
    /// The host is itself a component: global commands travel up as the third
    /// element of its update tuple.
    #[default]
    Nested,
    /// The host is the application root: global commands are mapped into its
    /// `GlobalMsg` variant and the shared model lives at `model.global`.
    TopLevel,
}

const IMPORT_LINE: &str = r"^import [^\n]*$";
/// Ends a declaration at its second trailing blank line, or at end of input.
const DECLARATION_END: &str = r"(?:\n\n$|\z)";
const RECORD_CLOSE: &str = r"^[ \t]*\}";
const LIST_CLOSE: &str = r"^[ \t]*\]";

const NESTED_UPDATE: &str = "
${module_basename}Msg subMsg ->
    let
        ( subModel, subCmd, globalCmd ) =
            ${module_basename}.update global subMsg model.${module_basename_lower1}
    in
    ( { model | ${module_basename_lower1} = subModel }
    , Cmd.map ${module_basename}Msg subCmd
    , globalCmd
    )";

const TOP_LEVEL_UPDATE: &str = "
${module_basename}Msg subMsg ->
    let
        ( subModel, subCmd, globalCmd ) =
            ${module_basename}.update model.global subMsg model.${module_basename_lower1}
    in
    ( { model | ${module_basename_lower1} = subModel }
    , Cmd.batch
        [ Cmd.map ${module_basename}Msg subCmd
        , Cmd.map GlobalMsg globalCmd
        ]
    )";

fn declaration(head: &str) -> String {
    format!(r"^{head}\b.*?{DECLARATION_END}")
}

/// Returns the seven composite wiring scripts in [`SCRIPT_ORDER`].
#[must_use]
pub fn composite_scripts(variant: UpdateVariant) -> ScriptTable {
    let update_template = match variant {
        UpdateVariant::Nested => NESTED_UPDATE,
        UpdateVariant::TopLevel => TOP_LEVEL_UPDATE,
    };

    ScriptTable::new(vec![
        WeaveScript::new(
            "import",
            vec![
                MatchSpec::new(IMPORT_LINE, -1)
                    .with_template("import ${module_name} as ${module_basename}"),
            ],
        ),
        WeaveScript::new(
            "model",
            vec![
                MatchSpec::new(declaration("type alias Model"), 0),
                MatchSpec::new(RECORD_CLOSE, -1)
                    .placed(Placement::Before)
                    .with_template(", ${module_basename_lower1} : ${module_basename}.Model"),
            ],
        ),
        WeaveScript::new(
            "init",
            vec![
                MatchSpec::new(declaration("init"), 0),
                MatchSpec::new(RECORD_CLOSE, -1)
                    .placed(Placement::Before)
                    .with_template(
                        ", ${module_basename_lower1} = ${module_basename}.init global",
                    ),
            ],
        ),
        WeaveScript::new(
            "msg",
            vec![
                MatchSpec::new(declaration("type Msg"), 0),
                MatchSpec::new(r"^[ \t]+[=|][^\n]*$", -1)
                    .with_template("| ${module_basename}Msg ${module_basename}.Msg"),
            ],
        ),
        WeaveScript::new(
            "update",
            vec![
                MatchSpec::new(declaration("update"), 0),
                MatchSpec::new(r"^[ \t]+\S[^\n]*$", -1)
                    .with_indent_offset(4)
                    .with_template(update_template),
            ],
        ),
        WeaveScript::new(
            "subscriptions",
            vec![
                MatchSpec::new(declaration("subscriptions"), 0),
                MatchSpec::new(LIST_CLOSE, -1).placed(Placement::Before).with_template(
                    ", Sub.map ${module_basename}Msg \
                     (${module_basename}.subscriptions global model.${module_basename_lower1})",
                ),
            ],
        ),
        WeaveScript::new(
            "view",
            vec![
                MatchSpec::new(declaration("viewContent"), 0),
                MatchSpec::new(LIST_CLOSE, -1).placed(Placement::Before).with_template(
                    ", Html.map ${module_basename}Msg \
                     (${module_basename}.view global model.${module_basename_lower1})",
                ),
            ],
        ),
    ])
}
