use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::bytes::complete::take_while1;
use nom::character::complete::space0;
use nom::character::complete::space1;
use nom::character::complete::u64 as number;
use nom::combinator::all_consuming;
use nom::sequence::*;
use nom::IResult;
use nom::Parser;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Next(String),
    Reserve(String, u64),
    Insert(String, u64),
    Max(String),
    Contains(String, u64),
    Quit,
}

fn bucket(input: &str) -> IResult<&str, String> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')
        .map(str::to_string)
        .parse(input)
}

fn keyword<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(name), space1)
}

fn bucket_and_id(input: &str) -> IResult<&str, (String, u64)> {
    separated_pair(bucket, space1, number)(input)
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        preceded(keyword("next"), bucket).map(Command::Next),
        preceded(keyword("reserve"), bucket_and_id)
            .map(|(bucket, count)| Command::Reserve(bucket, count)),
        preceded(keyword("insert"), bucket_and_id).map(|(bucket, id)| Command::Insert(bucket, id)),
        preceded(keyword("max"), bucket).map(Command::Max),
        preceded(keyword("contains"), bucket_and_id)
            .map(|(bucket, id)| Command::Contains(bucket, id)),
        tag("quit").map(|_| Command::Quit),
    ))(input)
}

pub fn parse(input: &str) -> Result<Command, String> {
    let (_, command) =
        all_consuming(delimited(space0, command, space0))(input).map_err(|err| err.to_string())?;
    Ok(command)
}
