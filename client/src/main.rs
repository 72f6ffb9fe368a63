use std::io::{self, Write};

use clap::Parser;
use tonic::transport::Channel;
use tonic::Status;

use parser::Command;
use sequences::sequence_service_client::SequenceServiceClient;
use sequences::*;

mod parser;

pub mod sequences {
    tonic::include_proto!("authseq.server");
}

#[derive(Parser, Debug)]
#[command(name = "authseq-client")]
#[command(about = "Interactive shell for the authseq gRPC server", long_about = None)]
struct Args {
    #[arg(long, env = "AUTHSEQ_ADDR", default_value = "http://[::1]:50051")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut client = SequenceServiceClient::connect(args.addr).await?;

    let mut line = String::new();
    loop {
        print!(">>> ");
        io::stdout().flush()?;
        line.clear();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parser::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                eprintln!("Invalid command: {}", err);
                continue;
            }
        };
        match execute(&mut client, command).await {
            Ok(output) => println!("{}", output),
            Err(status) => eprintln!("{:?}: {}", status.code(), status.message()),
        }
    }

    Ok(())
}

async fn execute(
    client: &mut SequenceServiceClient<Channel>,
    command: Command,
) -> Result<String, Status> {
    let output = match command {
        Command::Next(bucket) => {
            let response = client.next(NextRequest { bucket }).await?;
            response.into_inner().id.to_string()
        }
        Command::Reserve(bucket, count) => {
            let response = client.reserve(ReserveRequest { bucket, count }).await?;
            let ReserveResponse { first, last } = response.into_inner();
            format!("{}..={}", first, last)
        }
        Command::Insert(bucket, id) => {
            client.insert(InsertRequest { bucket, id }).await?;
            "ok".to_string()
        }
        Command::Max(bucket) => {
            let response = client.max(MaxRequest { bucket }).await?;
            response.into_inner().id.to_string()
        }
        Command::Contains(bucket, id) => {
            let response = client.contains(ContainsRequest { bucket, id }).await?;
            response.into_inner().found.to_string()
        }
        Command::Quit => String::new(),
    };
    Ok(output)
}
