//! Grammar for a single member declaration.
//!
//! ```text
//! member     = ws visibility ws name ws [ "(" ws ")" ] ws ":" ws type
//! visibility = "+" | "-" | "#" | ("public" | "private" | "protected") ws1
//! name       = anything up to "(" or ":", trimmed
//! type       = anything up to the end of the line, trimmed
//! ```

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, opt, peek, preceded, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, one_of, take_while},
};

use umbra_core::semantic::{Member, Visibility};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NotationDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<NotationDiagnostic>>;

/// A syntactically valid declaration, before model validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemberDecl<'a> {
    visibility: Visibility,
    name: &'a str,
    is_operation: bool,
    type_name: &'a str,
}

fn ws(input: &mut Input<'_>) -> IResult<()> {
    space0.void().parse_next(input)
}

fn visibility(input: &mut Input<'_>) -> IResult<Visibility> {
    let start = input.current_token_start();
    alt((
        '+'.value(Visibility::Public),
        '-'.value(Visibility::Private),
        '#'.value(Visibility::Protected),
        terminated(
            alt((
                literal("public").value(Visibility::Public),
                literal("private").value(Visibility::Private),
                literal("protected").value(Visibility::Protected),
            )),
            peek(one_of([' ', '\t'])),
        ),
    ))
    .context(NotationDiagnostic {
        code: ErrorCode::E001,
        message: "expected a visibility marker",
        help: Some("start the member with `+`, `-`, `#`, `public`, `private` or `protected`"),
        start,
    })
    .parse_next(input)
}

fn name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();
    take_while(1.., |c: char| !matches!(c, '(' | ':' | '\n' | '\r'))
        .map(str::trim_end)
        .verify(|s: &str| !s.is_empty())
        .context(NotationDiagnostic {
            code: ErrorCode::E002,
            message: "expected a member name",
            help: Some("write the name between the visibility marker and `:`"),
            start,
        })
        .parse_next(input)
}

/// Returns `true` when an empty parameter list marks an operation.
fn parameters(input: &mut Input<'_>) -> IResult<bool> {
    let start = input.current_token_start();
    opt(preceded(
        ('(', space0),
        cut_err(')'.context(NotationDiagnostic {
            code: ErrorCode::E003,
            message: "expected `)` to close the parameter list",
            help: Some("operations are written as `name(): Type`"),
            start,
        })),
    ))
    .map(|parens| parens.is_some())
    .parse_next(input)
}

fn type_separator(input: &mut Input<'_>) -> IResult<()> {
    let start = input.current_token_start();
    ':'.void()
        .context(NotationDiagnostic {
            code: ErrorCode::E004,
            message: "expected `:` before the type",
            help: Some("write members as `+ name: Type` or `+ name(): Type`"),
            start,
        })
        .parse_next(input)
}

fn type_name<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let start = input.current_token_start();
    take_while(1.., |c: char| c != '\n' && c != '\r')
        .map(str::trim_end)
        .verify(|s: &str| !s.is_empty())
        .context(NotationDiagnostic {
            code: ErrorCode::E005,
            message: "expected a type after `:`",
            help: None,
            start,
        })
        .parse_next(input)
}

fn member_decl<'a>(input: &mut Input<'a>) -> IResult<MemberDecl<'a>> {
    ws(input)?;
    let visibility = visibility(input)?;
    ws(input)?;
    let name = name(input)?;
    ws(input)?;
    let is_operation = parameters(input)?;
    ws(input)?;
    type_separator(input)?;
    ws(input)?;
    let type_name = type_name(input)?;

    Ok(MemberDecl {
        visibility,
        name,
        is_operation,
        type_name,
    })
}

/// Convert an ErrMode and error position to a Diagnostic.
///
/// Falls back to E006 (unexpected input) if no context is attached.
fn convert_err_mode(
    err: ErrMode<ContextError<NotationDiagnostic>>,
    error_pos: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(NotationDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let mut diag =
            Diagnostic::error(*code, *message).with_span(Span::new(*start..error_pos.max(*start)));
        if let Some(help) = help {
            diag = diag.with_help(*help);
        }
        return diag;
    }

    Diagnostic::error(ErrorCode::E006, "unexpected input")
        .with_span(Span::new(error_pos..error_pos.saturating_add(1)))
}

/// Parses one declaration into a validated [`Member`].
pub(crate) fn parse_member(source: &str) -> Result<Member, ParseError> {
    let mut input = LocatingSlice::new(source);

    let decl = match member_decl(&mut input) {
        Ok(decl) => decl,
        Err(err) => {
            let error_pos = input.current_token_start();
            return Err(convert_err_mode(err, error_pos).into());
        }
    };

    if input.eof_offset() > 0 {
        let start = input.current_token_start();
        return Err(Diagnostic::error(ErrorCode::E006, "unexpected input after the type")
            .with_span(Span::new(start..source.len()))
            .with_help("declare one member per line")
            .into());
    }

    let member = if decl.is_operation {
        Member::operation(decl.visibility, decl.name, decl.type_name)
    } else {
        Member::attribute(decl.visibility, decl.name, decl.type_name)
    };

    member.map_err(|err| {
        Diagnostic::error(ErrorCode::E100, err.to_string())
            .with_span(Span::new(0..source.len()))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(source: &str) -> MemberDecl<'_> {
        let mut input = LocatingSlice::new(source);
        member_decl(&mut input).expect("declaration should parse")
    }

    fn error_code(source: &str) -> ErrorCode {
        let err = parse_member(source).expect_err("declaration should fail");
        err.diagnostics()[0].code()
    }

    #[test]
    fn test_attribute_with_symbol_marker() {
        let parsed = decl("+ name: String");
        assert_eq!(parsed.visibility, Visibility::Public);
        assert_eq!(parsed.name, "name");
        assert!(!parsed.is_operation);
        assert_eq!(parsed.type_name, "String");
    }

    #[test]
    fn test_operation_with_keyword_marker() {
        let parsed = decl("protected  speak ( ) :void");
        assert_eq!(parsed.visibility, Visibility::Protected);
        assert_eq!(parsed.name, "speak");
        assert!(parsed.is_operation);
        assert_eq!(parsed.type_name, "void");
    }

    #[test]
    fn test_marker_without_space() {
        let parsed = decl("-count:int");
        assert_eq!(parsed.visibility, Visibility::Private);
        assert_eq!(parsed.name, "count");
    }

    #[test]
    fn test_type_keeps_inner_spaces() {
        let parsed = decl("# index: Map<String, List<Item>>   ");
        assert_eq!(parsed.type_name, "Map<String, List<Item>>");
    }

    #[test]
    fn test_name_runs_up_to_separator() {
        let parsed = decl("+ first name : String");
        assert_eq!(parsed.name, "first name");
        assert_eq!(parsed.type_name, "String");

        let parsed = decl("- 9lives(): int");
        assert_eq!(parsed.name, "9lives");
        assert!(parsed.is_operation);
    }

    #[test]
    fn test_keyword_needs_separator() {
        // `publicname` is neither a keyword marker nor a symbol marker
        assert_eq!(error_code("publicname: int"), ErrorCode::E001);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code("name: String"), ErrorCode::E001);
        assert_eq!(error_code("+ : String"), ErrorCode::E002);
        assert_eq!(error_code("+ speak(: void"), ErrorCode::E003);
        assert_eq!(error_code("+ name String"), ErrorCode::E004);
        assert_eq!(error_code("+ name:   "), ErrorCode::E005);
        assert_eq!(error_code("+ name: String\n+ other: int"), ErrorCode::E006);
    }

    #[test]
    fn test_error_span_points_at_problem() {
        // Without `:` the name runs to the end of the line
        let err = parse_member("+ name String").unwrap_err();
        let span = err.diagnostics()[0].span();
        assert_eq!(span.start(), 13);

        let err = parse_member("+ speak(: void").unwrap_err();
        assert_eq!(err.diagnostics()[0].span().start(), 7);
    }
}
