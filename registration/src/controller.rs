/* pkg-registration
 * Copyright (C) 2024 Frederic Henrichs <frederic@tinkerforge.com>
 *
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; if not, write to the
 * Free Software Foundation, Inc., 59 Temple Place - Suite 330,
 * Boston, MA 02111-1307, USA.
 */

use std::collections::BTreeMap;

use validator::{Validate, ValidationErrors};

use crate::{
    error::Error,
    field::{apply_digit_mask, Field, InputKind},
    options::{is_jurusan, is_kelas},
    record::RegistrationRecord,
    submit::{ClientConfig, Transport},
    text::title_case,
    ttl::format_ttl,
};

pub const SUBMIT_ALERT: &str = "Terjadi kesalahan saat mengirim data. Silakan coba lagi.";

/// Messages currently shown next to the inputs, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn set(&mut self, field: Field, error: Option<&str>) {
        match error {
            Some(msg) => {
                self.0.insert(field, msg.to_string());
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FormErrors::default();
        for (name, field_errors) in value.field_errors() {
            let Some(field) = Field::from_name(&name) else {
                continue;
            };
            let message = field_errors
                .iter()
                .find_map(|err| err.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("{} tidak valid", field.label()));
            errors.0.insert(field, message);
        }

        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed validation, nothing was sent.
    Invalid,
    /// An earlier submit has not completed yet, nothing was sent.
    InProgress,
    Submitted,
    /// The request failed. `alert` must be shown to the user as a blocking message;
    /// the form keeps its state so the same data can be submitted again.
    Failed { alert: &'static str },
}

/// A serialized registration ready to be handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub body: String,
}

impl Submission {
    pub async fn send<T: Transport>(self, transport: &T) -> anyhow::Result<()> {
        transport.post_json(&self.url, self.body).await
    }
}

/// State of the registration form between page load and reset.
#[derive(Debug, Default)]
pub struct FormController {
    config: ClientConfig,
    record: RegistrationRecord,
    errors: FormErrors,
    is_submitting: bool,
    submitted: bool,
}

impl FormController {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Applies a keystroke or selection to the record.
    ///
    /// Name-like fields are title-cased on every change. Any shown error for the
    /// field is dropped without re-validating, except for digit fields, whose error
    /// only goes away once the exact length is reached.
    pub fn change(&mut self, field: Field, value: &str) {
        match field.kind() {
            InputKind::Digits(len) => {
                let masked = apply_digit_mask(value, len);
                if masked.len() == len {
                    self.errors.clear(field);
                }
                self.record.set(field, masked);
            }
            InputKind::TitleCase => {
                self.record.set(field, title_case(value));
                self.errors.clear(field);
            }
            InputKind::Text | InputKind::Select => {
                self.record.set(field, value.to_string());
                self.errors.clear(field);
            }
        }
    }

    /// Like [`change`](Self::change) for the two selects, but only accepts values
    /// from the option tables.
    pub fn select_option(&mut self, field: Field, value: &str) -> Result<(), Error> {
        let known = match field {
            Field::KelasRuang => is_kelas(value),
            Field::Jurusan => is_jurusan(value),
            _ => return Err(Error::NotASelect),
        };
        if !known {
            return Err(Error::NotAnOption(value.to_string()));
        }

        self.change(field, value);
        Ok(())
    }

    /// Validates a single field when it loses focus.
    pub fn blur(&mut self, field: Field) {
        let error = field.validate(self.record.get(field));
        self.errors.set(field, error);
    }

    /// Validates all fields and replaces the error map. Returns `true` when the
    /// record may be submitted.
    pub fn validate_form(&mut self) -> bool {
        self.errors = match self.record.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => errors.into(),
        };

        self.errors.is_empty()
    }

    /// Combined place and date of birth as shown under the two inputs.
    pub fn preview(&self) -> String {
        format_ttl(&self.record.tempat_lahir, &self.record.tanggal_lahir)
    }

    /// The record as it is sent to the endpoint.
    pub fn payload(&self) -> RegistrationRecord {
        self.record.with_protected_phone()
    }

    /// First half of a submit: validates the form and, if it is clean, marks the
    /// form as submitting and returns the request to send. Inputs stay editable
    /// until [`finish_submit`](Self::finish_submit) is called.
    pub fn begin_submit(&mut self) -> Result<Submission, SubmitOutcome> {
        if self.is_submitting {
            return Err(SubmitOutcome::InProgress);
        }
        if !self.validate_form() {
            log::debug!("Not submitting, {} field(s) invalid", self.errors.len());
            return Err(SubmitOutcome::Invalid);
        }

        let body = match serde_json::to_string(&self.payload()) {
            Ok(body) => body,
            Err(err) => {
                log::error!("Error serializing registration: {err}");
                return Err(SubmitOutcome::Failed {
                    alert: SUBMIT_ALERT,
                });
            }
        };

        self.is_submitting = true;
        Ok(Submission {
            url: self.config.endpoint_url.clone(),
            body,
        })
    }

    /// Second half of a submit: records the result of the request.
    pub fn finish_submit(&mut self, result: anyhow::Result<()>) -> SubmitOutcome {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                log::info!("Form submitted");
                self.submitted = true;
                SubmitOutcome::Submitted
            }
            Err(err) => {
                log::error!("Error submitting form: {err:?}");
                SubmitOutcome::Failed {
                    alert: SUBMIT_ALERT,
                }
            }
        }
    }

    /// Validates, sends and records the result in one go.
    pub async fn submit<T: Transport>(&mut self, transport: &T) -> SubmitOutcome {
        let submission = match self.begin_submit() {
            Ok(s) => s,
            Err(outcome) => return outcome,
        };
        let result = submission.send(transport).await;

        self.finish_submit(result)
    }

    /// Starts over with an empty record, e.g. to register the next participant.
    pub fn reset(&mut self) {
        self.record = RegistrationRecord::default();
        self.errors = FormErrors::default();
        self.submitted = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        record::tests::valid_record,
        submit::{
            tests::{serve_once, FAILURE_RESPONSE, SUCCESS_RESPONSE},
            HttpTransport, DEFAULT_ENDPOINT,
        },
    };

    #[derive(Default)]
    struct RecordingTransport {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn post_json(&self, url: &str, body: String) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push((url.to_string(), body));
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    fn filled_form() -> FormController {
        filled_form_for(ClientConfig::default())
    }

    fn filled_form_for(config: ClientConfig) -> FormController {
        let mut form = FormController::new(config);
        let record = valid_record();
        for field in Field::ALL {
            form.change(field, record.get(field));
        }
        form
    }

    #[tokio::test]
    async fn test_valid_submit() {
        let mut form = filled_form();
        let transport = RecordingTransport::default();

        assert_eq!(form.submit(&transport).await, SubmitOutcome::Submitted);
        assert!(form.errors().is_empty());
        assert!(form.is_submitted());
        assert!(!form.is_submitting());

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, DEFAULT_ENDPOINT);
        let body: serde_json::Value = serde_json::from_str(&sent[0].1).unwrap();
        assert_eq!(body["nomorHp"], "'081234567890");
        assert_eq!(body["nama"], "Test User");
        assert!(body.get("ttl").is_none());
        // the marker only exists on the wire
        assert_eq!(form.record().nomor_hp, "081234567890");
    }

    #[tokio::test]
    async fn test_any_invalid_field_blocks_submit() {
        for field in Field::ALL {
            let mut form = filled_form();
            form.change(field, "");
            let transport = RecordingTransport::default();

            assert_eq!(form.submit(&transport).await, SubmitOutcome::Invalid);
            assert!(form.error(field).is_some(), "{field} has no error");
            assert_eq!(form.errors().len(), 1);
            assert!(transport.sent().is_empty());
            assert!(!form.is_submitted());
        }
    }

    #[tokio::test]
    async fn test_empty_form_reports_all_fields() {
        let mut form = FormController::default();
        let transport = RecordingTransport::default();

        assert_eq!(form.submit(&transport).await, SubmitOutcome::Invalid);
        assert_eq!(form.errors().len(), 10);
        assert_eq!(form.error(Field::KelasRuang), Some("Kelas/Ruang wajib dipilih"));
        assert_eq!(form.error(Field::Nik), Some("NIK wajib diisi"));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_state() {
        let mut form = filled_form();
        let transport = RecordingTransport::failing();

        assert_eq!(
            form.submit(&transport).await,
            SubmitOutcome::Failed {
                alert: SUBMIT_ALERT
            }
        );
        assert!(!form.is_submitted());
        assert!(!form.is_submitting());
        assert_eq!(form.record(), &valid_record());

        let retry = RecordingTransport::default();
        assert_eq!(form.submit(&retry).await, SubmitOutcome::Submitted);
        assert_eq!(transport.sent()[0].1, retry.sent()[0].1);
    }

    #[tokio::test]
    async fn test_endpoint_rejection_fails_submit() {
        let (url, server) = serve_once(FAILURE_RESPONSE).await;
        let mut form = filled_form_for(ClientConfig { endpoint_url: url });

        assert_eq!(
            form.submit(&HttpTransport::inspecting().unwrap()).await,
            SubmitOutcome::Failed {
                alert: SUBMIT_ALERT
            }
        );
        assert!(!form.is_submitted());
        assert!(!form.is_submitting());

        let request = server.await.unwrap();
        assert!(request.contains(r#""nomorHp":"'081234567890""#));
    }

    #[tokio::test]
    async fn test_endpoint_acceptance_submits() {
        let (url, server) = serve_once(SUCCESS_RESPONSE).await;
        let mut form = filled_form_for(ClientConfig { endpoint_url: url });

        assert_eq!(
            form.submit(&HttpTransport::inspecting().unwrap()).await,
            SubmitOutcome::Submitted
        );
        assert!(form.is_submitted());
        server.await.unwrap();
    }

    #[test]
    fn test_inputs_stay_editable_while_submitting() {
        let mut form = filled_form();
        let submission = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(SubmitOutcome::InProgress));

        form.change(Field::Alamat, "Jl. Lain No. 9, Bogor");
        assert_eq!(form.record().alamat, "Jl. Lain No. 9, Bogor");
        assert!(submission.body.contains("Jl. Test No. 123, Jakarta"));

        assert_eq!(form.finish_submit(Ok(())), SubmitOutcome::Submitted);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_title_case_on_change() {
        let mut form = FormController::default();
        form.change(Field::Nama, "budi SANTOSO");
        form.change(Field::TempatLahir, "jakarta selatan");
        form.change(Field::Alamat, "jl. mawar");
        assert_eq!(form.record().nama, "Budi Santoso");
        assert_eq!(form.record().tempat_lahir, "Jakarta Selatan");
        assert_eq!(form.record().alamat, "jl. mawar");
    }

    #[test]
    fn test_blur_validates_single_field() {
        let mut form = FormController::default();
        form.change(Field::Nama, "ab");
        form.blur(Field::Nama);
        assert_eq!(form.error(Field::Nama), Some("Nama Lengkap minimal 3 karakter"));
        assert_eq!(form.errors().len(), 1);

        form.change(Field::Nama, "abc");
        form.blur(Field::Nama);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_typing_clears_error_without_validating() {
        let mut form = FormController::default();
        form.blur(Field::Email);
        assert!(form.error(Field::Email).is_some());

        form.change(Field::Email, "not-an-email");
        assert_eq!(form.error(Field::Email), None);
    }

    #[test]
    fn test_masked_field_clears_error_at_exact_length() {
        let mut form = FormController::default();
        form.blur(Field::Nik);
        assert_eq!(form.error(Field::Nik), Some("NIK wajib diisi"));

        form.change(Field::Nik, "123456789012345");
        assert_eq!(form.error(Field::Nik), Some("NIK wajib diisi"));

        form.change(Field::Nik, "12345678901234567");
        assert_eq!(form.record().nik, "1234567890123456");
        assert_eq!(form.error(Field::Nik), None);

        form.change(Field::Nisn, "12ab34");
        assert_eq!(form.record().nisn, "1234");
    }

    #[test]
    fn test_preview() {
        let mut form = FormController::default();
        assert_eq!(form.preview(), "");
        form.change(Field::TempatLahir, "jakarta");
        assert_eq!(form.preview(), "Jakarta, [DD/MM/YYYY]");
        form.change(Field::TanggalLahir, "2005-01-15");
        assert_eq!(form.preview(), "Jakarta, 15 Januari 2005");
        form.change(Field::TempatLahir, "");
        assert_eq!(form.preview(), "[Tempat], 15 Januari 2005");
    }

    #[test]
    fn test_select_option() {
        let mut form = FormController::default();
        form.blur(Field::Jurusan);
        assert!(form.select_option(Field::Jurusan, "TKJ").is_ok());
        assert_eq!(form.record().jurusan, "TKJ");
        assert_eq!(form.error(Field::Jurusan), None);

        assert_eq!(
            form.select_option(Field::KelasRuang, "XII-1"),
            Err(Error::NotAnOption("XII-1".to_string()))
        );
        assert_eq!(form.record().kelas_ruang, "");
        assert_eq!(form.select_option(Field::Nama, "X-1"), Err(Error::NotASelect));
    }

    #[tokio::test]
    async fn test_reset() {
        let mut form = filled_form();
        form.submit(&RecordingTransport::default()).await;
        assert!(form.is_submitted());

        form.reset();
        assert!(!form.is_submitted());
        assert!(form.errors().is_empty());
        assert_eq!(form.record(), &RegistrationRecord::default());
        assert_eq!(form.preview(), "");
    }
}
