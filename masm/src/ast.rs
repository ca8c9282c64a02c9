use std::collections::BTreeMap;

use matches::debug_assert_matches;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest::Parser;

use meshcpu::error::{CpuException, Result};
use meshcpu::{AstNode, BlockId, SettingMap, Variables};

use crate::parser::{MasmParser, Rule};

/// Per-bank instruction lists, keyed by block label. Ordered so that every
/// downstream artifact of the same source is identical.
pub type Ast = BTreeMap<BlockId, Vec<AstNode>>;

/// Parses preprocessed source into the abstract instruction stream, the
/// raw setting directives and the variable site table.
pub fn build_ast(input: &str) -> Result<(Ast, SettingMap, Variables)> {
    // The grammar wants every item newline-terminated.
    let mut source = String::with_capacity(input.len() + 1);
    source.push_str(input);
    if !source.ends_with('\n') {
        source.push('\n');
    }

    let file = MasmParser::parse(Rule::file, &source)
        .map_err(from_pest_error)?
        .next()
        .ok_or_else(|| CpuException::syntax("empty input"))?;

    let mut ast = Ast::new();
    let mut settings = SettingMap::new();
    let mut variables = Variables::new();

    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::setting => process_setting(pair, &mut settings)?,
            Rule::block => process_block(pair, &mut ast, &mut variables)?,
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    // Every variable letter up to the highest one used must have at least
    // one load site.
    for (index, sites) in variables.iter().enumerate() {
        if sites.is_empty() {
            return Err(CpuException::unassigned_variable(index));
        }
    }

    Ok((ast, settings, variables))
}

fn process_setting(pair: Pair<Rule>, settings: &mut SettingMap) -> Result<()> {
    debug_assert_matches!(pair.as_rule(), Rule::setting);
    let mut pairs = pair.into_inner();
    let name = pairs.next().unwrap().as_str().to_owned();

    let mut args = Vec::new();
    if let Some(list) = pairs.next() {
        for value in list.into_inner() {
            args.push(process_byte_literal(value, 0)?);
        }
    }

    // A repeated directive overwrites the earlier one.
    settings.insert(name, args);
    Ok(())
}

fn process_block(pair: Pair<Rule>, ast: &mut Ast, variables: &mut Variables) -> Result<()> {
    debug_assert_matches!(pair.as_rule(), Rule::block);
    let mut pairs = pair.into_inner();

    let label = pairs.next().unwrap().into_inner().next().unwrap();
    let block_id = process_byte_literal(label, 0)?;

    for statement in pairs {
        let inner = statement.into_inner().next().unwrap();
        let line = inner.as_span().start_pos().line_col().0;

        match inner.as_rule() {
            Rule::variable_load => {
                let mut parts = inner.into_inner();
                let mnemonic = parts.next().unwrap().as_str().to_owned();
                let letter = parts.next().unwrap().as_str().bytes().next().unwrap();
                let index = (letter - b'a') as usize;

                let nodes = ast.entry(block_id).or_insert_with(Vec::new);
                push_node(nodes, (mnemonic, vec![0]), block_id, line)?;

                if variables.len() < index + 1 {
                    variables.resize(index + 1, Vec::new());
                }
                variables[index].push((block_id, (nodes.len() - 1) as u8));
            }
            Rule::instruction => {
                let mut parts = inner.into_inner();
                let mnemonic = parts.next().unwrap().as_str().to_owned();

                let mut args = Vec::new();
                if let Some(list) = parts.next() {
                    for value in list.into_inner() {
                        args.push(process_byte_literal(value, -128)?);
                    }
                }

                let nodes = ast.entry(block_id).or_insert_with(Vec::new);
                push_node(nodes, (mnemonic, args), block_id, line)?;
            }
            _ => unreachable!(),
        }
    }

    Ok(())
}

// Negative instruction arguments are stored two's complement wrapped, the
// byte form the opcode encoders expect.
fn process_byte_literal(pair: Pair<Rule>, min: i64) -> Result<u8> {
    let line = pair.as_span().start_pos().line_col().0;
    // The grammar only passes digit runs here, so the sole failure mode of
    // the conversion is overflow.
    let value: i64 = pair.as_str().parse().unwrap_or(i64::max_value());
    if value < min || value > 0xFF {
        return Err(CpuException::overflowing_literal(value).with_line(line));
    }
    Ok(value as u8)
}

fn push_node(
    nodes: &mut Vec<AstNode>,
    node: AstNode,
    block_id: BlockId,
    line: usize,
) -> Result<()> {
    if nodes.len() >= 0xFF {
        return Err(CpuException::image_too_large(format!(
            "block {} exceeds 255 instructions",
            block_id
        ))
        .with_line(line));
    }
    nodes.push(node);
    Ok(())
}

fn from_pest_error(err: pest::error::Error<Rule>) -> CpuException {
    let line = match err.line_col {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((line, _), _) => line,
    };
    CpuException::syntax("unrecognized expression").with_line(line)
}
