//! File upload endpoint

use crate::AssistantClient;
use crate::error::Result;
use newsdesk_core::domain::file::{ASSISTANTS_PURPOSE, FileObject};
use reqwest::multipart::{Form, Part};

impl AssistantClient {
    /// Upload a document for use by assistants
    ///
    /// # Arguments
    /// * `filename` - Name recorded by the service
    /// * `bytes` - File contents
    ///
    /// # Returns
    /// The stored file; its `id` can be attached to messages
    pub async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<FileObject> {
        let form = Form::new()
            .text("purpose", ASSISTANTS_PURPOSE)
            .part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let response = self
            .client
            .post(self.url("files"))
            .headers(self.headers()?)
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
