use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use authseq::config::StorageConfig;
use authseq::config::DEFAULT_DB_PATH;
use authseq::schema::Bucket;
use authseq::schema::IdWidth;
use authseq::sequence::generator::SequenceGenerator;
use authseq::sequence::SequenceError;
use authseq::storage::WriteStorage;
use clap::Parser;
use tonic::{transport::Server, Request, Response, Status};
use tracing::error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use server::sequence_service_server::SequenceService;
use server::sequence_service_server::SequenceServiceServer;
use server::*;

pub mod server {
    tonic::include_proto!("authseq.server");
}

#[derive(Parser, Debug)]
#[command(name = "authseq-server")]
#[command(about = "Serves authority record identifiers over gRPC", long_about = None)]
struct Args {
    /// RocksDB directory holding the sequence tables.
    #[arg(long, env = "AUTHSEQ_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    #[arg(long, env = "AUTHSEQ_ADDR", default_value = "[::1]:50051")]
    addr: SocketAddr,

    /// Key column width of a new store, bigint when unset. An existing store keeps its
    /// recorded width and refuses a different one.
    #[arg(long, env = "AUTHSEQ_WIDTH")]
    width: Option<IdWidth>,

    /// Return ids without waiting for the write-ahead log to be synced.
    #[arg(long, env = "AUTHSEQ_NO_SYNC")]
    no_sync: bool,
}

pub struct SequenceServiceImpl<S> {
    generator: Arc<SequenceGenerator<S>>,
}

impl<S> SequenceServiceImpl<S>
where
    S: WriteStorage + Send + Sync + 'static,
    S::Error: Send + 'static,
{
    pub fn new(generator: SequenceGenerator<S>) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Runs `f` against the generator on the blocking pool, storage calls may hit the disk.
    async fn run<T, F>(&self, f: F) -> Result<T, Status>
    where
        T: Send + 'static,
        F: FnOnce(&SequenceGenerator<S>) -> Result<T, SequenceError<S::Error>> + Send + 'static,
    {
        let generator = Arc::clone(&self.generator);
        tokio::task::spawn_blocking(move || f(&generator))
            .await
            .map_err(|err| Status::internal(err.to_string()))?
            .map_err(to_status)
    }
}

#[tonic::async_trait]
impl<S> SequenceService for SequenceServiceImpl<S>
where
    S: WriteStorage + Send + Sync + 'static,
    S::Error: Send + 'static,
{
    async fn next(&self, request: Request<NextRequest>) -> Result<Response<NextResponse>, Status> {
        let bucket = parse_bucket(&request.get_ref().bucket)?;
        let id = self.run(move |generator| generator.next(bucket)).await?;
        Ok(Response::new(NextResponse { id }))
    }

    async fn reserve(
        &self,
        request: Request<ReserveRequest>,
    ) -> Result<Response<ReserveResponse>, Status> {
        let ReserveRequest { bucket, count } = request.into_inner();
        let bucket = parse_bucket(&bucket)?;
        let ids = self
            .run(move |generator| generator.reserve(bucket, count))
            .await?;
        Ok(Response::new(ReserveResponse {
            first: *ids.start(),
            last: *ids.end(),
        }))
    }

    async fn insert(
        &self,
        request: Request<InsertRequest>,
    ) -> Result<Response<InsertResponse>, Status> {
        let InsertRequest { bucket, id } = request.into_inner();
        let bucket = parse_bucket(&bucket)?;
        self.run(move |generator| generator.insert(bucket, id)).await?;
        Ok(Response::new(InsertResponse {}))
    }

    async fn max(&self, request: Request<MaxRequest>) -> Result<Response<MaxResponse>, Status> {
        let bucket = parse_bucket(&request.get_ref().bucket)?;
        let id = self.run(move |generator| generator.max(bucket)).await?;
        Ok(Response::new(MaxResponse { id }))
    }

    async fn contains(
        &self,
        request: Request<ContainsRequest>,
    ) -> Result<Response<ContainsResponse>, Status> {
        let ContainsRequest { bucket, id } = request.into_inner();
        let bucket = parse_bucket(&bucket)?;
        let found = self
            .run(move |generator| generator.contains(bucket, id))
            .await?;
        Ok(Response::new(ContainsResponse { found }))
    }
}

fn parse_bucket(name: &str) -> Result<Bucket, Status> {
    Bucket::from_str(name).map_err(|err| Status::invalid_argument(err.to_string()))
}

fn to_status<E: std::error::Error>(err: SequenceError<E>) -> Status {
    match err {
        SequenceError::InvalidId { .. }
        | SequenceError::EmptyReservation
        | SequenceError::ReservationTooLarge(_) => Status::invalid_argument(err.to_string()),
        SequenceError::DuplicateId { .. } => Status::already_exists(err.to_string()),
        SequenceError::Exhausted { .. } => Status::resource_exhausted(err.to_string()),
        SequenceError::Poisoned => {
            error!("storage lock poisoned");
            Status::internal(err.to_string())
        }
        SequenceError::StorageError(err) => {
            error!(error = %err, "storage failure");
            Status::internal(format!("storage error: {}", err))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = StorageConfig::new(&args.db_path).with_sync(!args.no_sync);
    if let Some(width) = args.width {
        config = config.with_width(width);
    }
    let generator = SequenceGenerator::new(config.open()?);
    for table in generator.tables()? {
        let last_id = generator.max(table.bucket)?;
        info!(
            table = table.name,
            source = table.bucket.source(),
            last_id,
            "serving table"
        );
    }

    info!(addr = %args.addr, "listening");
    Server::builder()
        .add_service(SequenceServiceServer::new(SequenceServiceImpl::new(generator)))
        .serve(args.addr)
        .await?;

    Ok(())
}
