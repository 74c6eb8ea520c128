//! Typed input lines translated into form commands.

use anyhow::{anyhow, bail, Context, Result};
use shared::{
    domain::{Category, DraftField, InputKind},
    protocol::FormCommand,
};

pub const HELP: &str = "\
commands:
  title <text>        set the title
  content <text>      set the body
  category <name>     one of: Technology, Health, Science, Education, Business
  publish yes|no      set the publish flag
  tag <text>          add a tag (max 5, no duplicates)
  untag <index>       remove the tag at index
  submit              create the post
  show                redraw the form
  posts               list created posts as JSON
  help                this text
  quit                exit";

#[derive(Debug, PartialEq, Eq)]
pub enum InputLine {
    Form(Vec<FormCommand>),
    Show,
    Posts,
    Help,
    Quit,
    Empty,
}

pub fn parse_line(line: &str) -> Result<InputLine> {
    let line = line.trim_start();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim_end(), ""),
    };

    let parsed = match verb {
        "" => InputLine::Empty,
        "title" => single(update(DraftField::Title, rest, InputKind::Text)),
        "content" => single(update(DraftField::Content, rest, InputKind::Textarea)),
        "category" => {
            let category: Category = rest.parse()?;
            single(update(DraftField::Category, category.as_str(), InputKind::Select))
        }
        "publish" => {
            let value = match rest.to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" => "true",
                "no" | "n" | "false" => "false",
                other => bail!("publish expects yes or no, got '{other}'"),
            };
            single(update(DraftField::Published, value, InputKind::Radio))
        }
        "tag" => InputLine::Form(vec![
            FormCommand::UpdateTagBuffer {
                text: rest.to_string(),
            },
            FormCommand::AddTag,
        ]),
        "untag" => {
            let index = rest
                .parse::<usize>()
                .with_context(|| format!("untag expects a tag index, got '{rest}'"))?;
            single(FormCommand::DeleteTag { index })
        }
        "submit" => single(FormCommand::Submit),
        "show" => InputLine::Show,
        "posts" => InputLine::Posts,
        "help" => InputLine::Help,
        "quit" | "exit" => InputLine::Quit,
        other => return Err(anyhow!("unknown command '{other}', try 'help'")),
    };
    Ok(parsed)
}

fn update(field: DraftField, value: &str, input: InputKind) -> FormCommand {
    FormCommand::UpdateField {
        field,
        value: value.to_string(),
        input,
    }
}

fn single(cmd: FormCommand) -> InputLine {
    InputLine::Form(vec![cmd])
}
