use crate::actors::TimerHandle;
use anyhow::{Context, Result};
use etut_protocol::{Request, Response};
use interprocess::local_socket::{
    tokio::{prelude::*, Stream},
    GenericFilePath, ListenerOptions,
};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error, info, instrument};

pub struct Server {
    socket_path: PathBuf,
    timer_handle: TimerHandle,
}

impl Server {
    pub fn new(timer_handle: TimerHandle) -> Result<Self> {
        let uid = unsafe { libc::getuid() };
        let socket_path = PathBuf::from(format!("/run/user/{}/etut.sock", uid));
        Ok(Self {
            socket_path,
            timer_handle,
        })
    }

    fn cleanup_stale_socket(&self) -> Result<()> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path).context("failed to remove stale socket")?;
            debug!("removed stale socket file");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        self.cleanup_stale_socket()?;

        let listener = ListenerOptions::new()
            .name(self.socket_path.as_os_str().to_fs_name::<GenericFilePath>()?)
            .create_tokio()?;

        info!(path = %self.socket_path.display(), "server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok(stream) => {
                            let timer_handle = self.timer_handle.clone();
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, timer_handle).await {
                                    error!(%error, "connection handler failed");
                                }
                            });
                        }
                        Err(error) => {
                            error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        self.cleanup_socket();
        Ok(())
    }

    fn cleanup_socket(&self) {
        if let Err(error) = std::fs::remove_file(&self.socket_path) {
            debug!(%error, "socket file already removed");
        } else {
            debug!("socket file cleaned up");
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.cleanup_socket();
    }
}

async fn handle_connection(mut stream: Stream, timer_handle: TimerHandle) -> Result<()> {
    debug!("new connection accepted");

    let mut length_buffer = [0u8; 4];
    stream.read_exact(&mut length_buffer).await?;
    let length = u32::from_le_bytes(length_buffer) as usize;

    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload).await?;

    let request: Request =
        bincode::deserialize(&payload).context("failed to deserialize request")?;

    debug!(?request, "received request");

    let response = handle_request(request, &timer_handle).await;

    debug!(?response, "sending response");

    let response_bytes = bincode::serialize(&response)?;
    let response_length = (response_bytes.len() as u32).to_le_bytes();

    stream.write_all(&response_length).await?;
    stream.write_all(&response_bytes).await?;
    stream.flush().await?;

    Ok(())
}

async fn handle_request(request: Request, timer_handle: &TimerHandle) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Start => acknowledge(timer_handle.start().await, "failed to start the timer"),

        Request::Pause => acknowledge(timer_handle.pause().await, "failed to pause the timer"),

        Request::Resume => acknowledge(timer_handle.resume().await, "failed to resume the timer"),

        Request::Stop { name } => {
            acknowledge(timer_handle.stop(name).await, "failed to stop the session")
        }

        Request::ClearLedger => {
            acknowledge(timer_handle.clear().await, "failed to clear the ledger")
        }

        Request::Rename { id, name } => match timer_handle.rename(id, name).await {
            Some(true) => Response::Ok,
            Some(false) => Response::Error {
                message: "no renameable session with that id".to_string(),
            },
            None => Response::Error {
                message: "timer unavailable".to_string(),
            },
        },

        Request::SetWorkDuration { minutes } => {
            match timer_handle.set_work_duration(minutes).await {
                Some(applied) => Response::DurationSet { minutes: applied },
                None => Response::Error {
                    message: "timer unavailable".to_string(),
                },
            }
        }

        Request::SetBreakDuration { minutes } => {
            match timer_handle.set_break_duration(minutes).await {
                Some(applied) => Response::DurationSet { minutes: applied },
                None => Response::Error {
                    message: "timer unavailable".to_string(),
                },
            }
        }

        Request::GetStatus => match timer_handle.get_status().await {
            Some(status) => Response::Status {
                phase: status.phase,
                time_left_seconds: status.time_left,
                session_name: status.session_name,
                session_kind: status.session_kind,
                work_duration_minutes: status.work_duration_minutes,
                break_duration_minutes: status.break_duration_minutes,
            },
            None => Response::Error {
                message: "failed to fetch status".to_string(),
            },
        },

        Request::GetLedger => match timer_handle.get_ledger().await {
            Some(sessions) => Response::Ledger { sessions },
            None => Response::Error {
                message: "failed to fetch the ledger".to_string(),
            },
        },

        Request::GetStats => match timer_handle.get_stats().await {
            Some(stats) => Response::Stats {
                total_work_seconds: stats.total_work_seconds,
                total_break_seconds: stats.total_break_seconds,
                work_session_count: stats.work_session_count,
                break_session_count: stats.break_session_count,
                today_work_minutes: stats.today_work_minutes,
            },
            None => Response::Error {
                message: "failed to fetch statistics".to_string(),
            },
        },
    }
}

fn acknowledge<E>(result: Result<(), E>, error_message: &str) -> Response {
    match result {
        Ok(()) => Response::Ok,
        Err(_) => Response::Error {
            message: error_message.to_string(),
        },
    }
}
