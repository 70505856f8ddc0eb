use std::sync::Arc;

use tracing::{info, warn};

use crate::app::model::Job;
use crate::app::{App, Message, Model};
use crate::services::{PersistenceError, RenderError, ServiceError};

impl App {
    /// Start every job `update` queued on the model.
    pub(super) fn handle_message_side_effects(&self, model: &mut Model) {
        for job in std::mem::take(&mut model.outbox) {
            self.start_job(job);
        }
    }

    fn start_job(&self, job: Job) {
        match job {
            Job::Improve(request) => {
                let improver = Arc::clone(&self.services.improver);
                info!(kind = ?request.kind, generation = request.generation, "improve requested");
                let (kind, generation) = (request.kind, request.generation);
                self.jobs.spawn(
                    "improve",
                    move || {
                        let result = improver.improve(&request.text, request.kind.context_type());
                        if let Err(err) = &result {
                            warn!(error = %err, "improve failed");
                        }
                        Message::ImproveFinished {
                            kind: request.kind,
                            generation: request.generation,
                            result,
                        }
                    },
                    move |reason| Message::ImproveFinished {
                        kind,
                        generation,
                        result: Err(ServiceError::Interrupted(reason)),
                    },
                );
            }
            Job::Save(document) => {
                let persistence = Arc::clone(&self.services.persistence);
                self.jobs.spawn(
                    "save",
                    move || {
                        let result = persistence.save(&document);
                        match &result {
                            Ok(record) => info!(path = %record.path.display(), bytes = record.bytes, "saved"),
                            Err(err) => warn!(error = %err, "save failed"),
                        }
                        Message::SaveFinished(result)
                    },
                    |reason| Message::SaveFinished(Err(PersistenceError::Interrupted(reason))),
                );
            }
            Job::Export(markdown) => {
                let renderer = Arc::clone(&self.services.renderer);
                let options = self.services.render_options;
                self.jobs.spawn(
                    "export",
                    move || {
                        let result = renderer.render_to_file(&markdown, &options);
                        match &result {
                            Ok(path) => info!(path = %path.display(), "exported"),
                            Err(err) => warn!(error = %err, "export failed"),
                        }
                        Message::ExportFinished(result)
                    },
                    |reason| Message::ExportFinished(Err(RenderError::Interrupted(reason))),
                );
            }
        }
    }
}
