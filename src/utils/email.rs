use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument, warn};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

/// How a caller treats a failed send.
///
/// Replaces nested catch-and-maybe-rethrow control flow with one explicit
/// switch: the call site states its policy and [`settle`] applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Failure is logged and swallowed (welcome mail).
    BestEffort,
    /// Failure becomes `TWO_FACTOR_EMAIL_FAILED` (2FA code mail).
    Required,
}

/// Applies a delivery policy to a send result.
pub fn settle(policy: Delivery, result: Result<(), AppError>) -> Result<(), AppError> {
    match (policy, result) {
        (_, Ok(())) => Ok(()),
        (Delivery::BestEffort, Err(err)) => {
            warn!(error = ?err, "Best-effort email delivery failed");
            Ok(())
        }
        (Delivery::Required, Err(err)) => {
            warn!(error = ?err, "Required email delivery failed");
            Err(AppError::TwoFactorEmailFailed)
        }
    }
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_welcome_email(&self, to_email: &str, to_name: &str) -> Result<(), AppError> {
        let text_body = format!(
            "Hi {},\n\n\
             Welcome to Inkpost! Your account has been created.\n\n\
             Log in to verify your email and start posting.\n\n\
             Best regards,\n\
             The Inkpost Team",
            to_name
        );
        let html_body = self.welcome_template(to_name);

        self.send_email(to_email, "Welcome to Inkpost", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, code))]
    pub async fn send_two_factor_code(
        &self,
        to_email: &str,
        to_name: &str,
        code: &str,
        ttl_minutes: i64,
    ) -> Result<(), AppError> {
        let text_body = format!(
            "Hi {},\n\n\
             Your verification code is: {}\n\n\
             It expires in {} minutes. If you didn't try to log in,\n\
             you can ignore this email.\n\n\
             Best regards,\n\
             The Inkpost Team",
            to_name, code, ttl_minutes
        );
        let html_body = self.two_factor_template(to_name, code, ttl_minutes);

        self.send_email(to_email, "Your verification code", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, text_body, html_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, "SMTP disabled, skipping send");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from.parse().map_err(AppError::internal)?)
            .to(to_email.parse().map_err(AppError::internal)?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(AppError::internal)?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(AppError::internal)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        // lettre's SmtpTransport is blocking; keep it off the runtime.
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(AppError::internal)?
            .map_err(AppError::internal)?;

        Ok(())
    }

    fn welcome_template(&self, name: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden;">
        <tr>
            <td style="background-color: #4F46E5; padding: 30px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 28px;">Inkpost</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 40px 30px;">
                <h2 style="margin: 0 0 20px 0; color: #333333;">Welcome aboard</h2>
                <p style="margin: 0 0 20px 0; color: #666666; font-size: 16px;">
                    Hi <strong>{}</strong>, your account has been created.
                </p>
                <p style="margin: 0; color: #666666; font-size: 16px;">
                    Log in to verify your email and start posting.
                </p>
            </td>
        </tr>
        <tr>
            <td style="background-color: #f8f9fa; padding: 20px 30px; text-align: center;">
                <p style="margin: 0; color: #999999; font-size: 12px;">
                    This is an automated email from Inkpost. Please do not reply.
                </p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
            name
        )
    }

    fn two_factor_template(&self, name: &str, code: &str, ttl_minutes: i64) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden;">
        <tr>
            <td style="background-color: #4F46E5; padding: 30px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 28px;">Inkpost</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 40px 30px;">
                <h2 style="margin: 0 0 20px 0; color: #333333;">Your verification code</h2>
                <p style="margin: 0 0 20px 0; color: #666666; font-size: 16px;">
                    Hi <strong>{}</strong>, use this code to finish logging in:
                </p>
                <p style="margin: 0 0 20px 0; text-align: center; font-size: 32px; letter-spacing: 8px; color: #111827;">
                    <strong>{}</strong>
                </p>
                <p style="margin: 0; color: #666666; font-size: 14px;">
                    The code expires in <strong>{} minutes</strong>. If you didn't try to
                    log in, you can ignore this email.
                </p>
            </td>
        </tr>
        <tr>
            <td style="background-color: #f8f9fa; padding: 20px 30px; text-align: center;">
                <p style="margin: 0; color: #999999; font-size: 12px;">
                    This is an automated email from Inkpost. Please do not reply.
                </p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
            name, code, ttl_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_effort_swallows_failure() {
        let result = settle(Delivery::BestEffort, Err(AppError::internal(anyhow::anyhow!("smtp down"))));
        assert!(result.is_ok());
    }

    #[test]
    fn required_propagates_as_two_factor_failure() {
        let result = settle(Delivery::Required, Err(AppError::internal(anyhow::anyhow!("smtp down"))));
        assert!(matches!(result, Err(AppError::TwoFactorEmailFailed)));
    }

    #[test]
    fn success_is_success_under_both_policies() {
        assert!(settle(Delivery::BestEffort, Ok(())).is_ok());
        assert!(settle(Delivery::Required, Ok(())).is_ok());
    }
}
