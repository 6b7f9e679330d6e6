//! Background processing thread
//!
//! One job per thread. The caller only sees [`ProcessMessage`]s; exactly one
//! `Finished` is sent per job and it is always the last message.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use sc_cad::CadKernel;

use crate::pipeline::{ProgressReporter, StepProcessor};
use crate::settings::ProcessSettings;

/// Notification from a processing thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessMessage {
    Progress(u8),
    Status(String),
    Finished { success: bool, message: String },
}

impl ProgressReporter for Sender<ProcessMessage> {
    fn progress(&mut self, percent: u8) {
        let _ = self.send(ProcessMessage::Progress(percent));
    }

    fn status(&mut self, message: &str) {
        let _ = self.send(ProcessMessage::Status(message.to_string()));
    }
}

/// Everything a processing thread needs
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: ProcessSettings,
}

/// Caller side of a running job
pub struct ProcessingHandle {
    receiver: Receiver<ProcessMessage>,
    thread: Option<JoinHandle<()>>,
    finished: bool,
}

impl ProcessingHandle {
    /// Drain pending messages without blocking
    pub fn poll(&mut self) -> Vec<ProcessMessage> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => {
                    self.observe(&message);
                    messages.push(message);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected(&mut messages);
                    break;
                }
            }
        }
        messages
    }

    /// Block until the job finishes, returning every remaining message
    pub fn wait(mut self) -> Vec<ProcessMessage> {
        let mut messages = Vec::new();
        while !self.finished {
            match self.receiver.recv() {
                Ok(message) => {
                    self.observe(&message);
                    messages.push(message);
                }
                Err(_) => self.disconnected(&mut messages),
            }
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        messages
    }

    /// Whether the `Finished` message has been received
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn observe(&mut self, message: &ProcessMessage) {
        if matches!(message, ProcessMessage::Finished { .. }) {
            self.finished = true;
        }
    }

    // The thread died without reporting; synthesize its completion
    fn disconnected(&mut self, messages: &mut Vec<ProcessMessage>) {
        if !self.finished {
            tracing::error!("Processing thread exited without reporting a result");
            self.finished = true;
            messages.push(ProcessMessage::Finished {
                success: false,
                message: "Error: processing thread stopped unexpectedly".to_string(),
            });
        }
    }
}

/// Run `job` on a new thread
pub fn spawn_processing(
    kernel: Arc<dyn CadKernel>,
    job: ProcessingJob,
) -> std::io::Result<ProcessingHandle> {
    let (sender, receiver) = mpsc::channel();

    let thread = thread::Builder::new()
        .name("step-processing".into())
        .spawn(move || run_job(kernel, job, sender))?;

    Ok(ProcessingHandle {
        receiver,
        thread: Some(thread),
        finished: false,
    })
}

fn run_job(kernel: Arc<dyn CadKernel>, job: ProcessingJob, mut sender: Sender<ProcessMessage>) {
    let mut processor = StepProcessor::new(kernel);
    let result = processor.process_file(&job.input, &job.output, &job.settings, &mut sender);

    let finished = match result {
        Ok(summary) => {
            let file_name = summary
                .output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| summary.output.display().to_string());
            ProcessMessage::Finished {
                success: true,
                message: format!("Successfully created: {file_name}"),
            }
        }
        Err(e) => ProcessMessage::Finished {
            success: false,
            message: format!("Error: {}", e.report()),
        },
    };

    // Release the shape before announcing completion
    drop(processor);
    let _ = sender.send(finished);
}
