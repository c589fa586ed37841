use super::theme;
use eframe::egui::{self, RichText};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    InvalidEmail,
    EmptyPassword,
    PasswordMismatch,
}

impl FieldProblem {
    pub fn message(&self) -> &'static str {
        match self {
            FieldProblem::InvalidEmail => "Enter a valid email address",
            FieldProblem::EmptyPassword => "Choose a password",
            FieldProblem::PasswordMismatch => "Passwords do not match",
        }
    }
}

/// Local state of the account form. Nothing is sent anywhere.
#[derive(Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_confirm: bool,
    pub problems: Option<Vec<FieldProblem>>,
}

// Passwords stay out of logs and debug dumps.
impl std::fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpForm")
            .field("email", &self.email)
            .field("problems", &self.problems)
            .finish_non_exhaustive()
    }
}

impl SignUpForm {
    pub fn validate(&self) -> Vec<FieldProblem> {
        let mut problems = Vec::new();

        let email = self.email.trim();
        let email_ok = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if !email_ok {
            problems.push(FieldProblem::InvalidEmail);
        }
        if self.password.is_empty() {
            problems.push(FieldProblem::EmptyPassword);
        }
        if self.password != self.confirm_password {
            problems.push(FieldProblem::PasswordMismatch);
        }

        problems
    }

    pub fn submit(&mut self) {
        let problems = self.validate();
        info!("Sign-up form checked, {} problem(s)", problems.len());
        self.problems = Some(problems);
    }

    pub fn render(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(320.0);
            ui.add_space(40.0);
            ui.heading("Create an Account");
            ui.add_space(12.0);

            ui.add_enabled(
                false,
                egui::Button::new("Sign in with Google").min_size(egui::vec2(260.0, 36.0)),
            )
            .on_disabled_hover_text("Google sign-in is not available yet");

            ui.add_space(8.0);
            ui.label("Or");
            ui.add_space(8.0);

            ui.add(
                egui::TextEdit::singleline(&mut self.email)
                    .hint_text("Email")
                    .desired_width(300.0),
            );
            ui.add_space(8.0);
            password_field(ui, "Password", &mut self.password, &mut self.show_password);
            ui.add_space(8.0);
            password_field(
                ui,
                "Confirm Password",
                &mut self.confirm_password,
                &mut self.show_confirm,
            );

            ui.add_space(20.0);
            let button = egui::Button::new(RichText::new("Sign Up").color(egui::Color32::WHITE))
                .fill(theme::GOOGLE_BLUE)
                .min_size(egui::vec2(200.0, 40.0));
            if ui.add(button).clicked() {
                self.submit();
            }

            if let Some(problems) = &self.problems {
                ui.add_space(10.0);
                if problems.is_empty() {
                    ui.colored_label(theme::SUCCESS, "Looks good!");
                }
                for problem in problems {
                    ui.colored_label(theme::ERROR, problem.message());
                }
            }
        });
    }
}

fn password_field(ui: &mut egui::Ui, hint: &str, value: &mut String, visible: &mut bool) {
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .password(!*visible)
                .desired_width(260.0),
        );
        let icon = if *visible { "🙈" } else { "👁" };
        if ui.button(icon).on_hover_text("Show or hide password").clicked() {
            *visible = !*visible;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(email: &str, password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_form_has_no_problems() {
        assert!(form("ana@example.com", "hunter2", "hunter2").validate().is_empty());
    }

    #[test]
    fn email_needs_both_sides_of_the_at() {
        for email in ["", "ana", "@example.com", "ana@", "a@b@c"] {
            assert_eq!(
                form(email, "pw", "pw").validate(),
                vec![FieldProblem::InvalidEmail],
                "email {:?}",
                email
            );
        }
    }

    #[test]
    fn password_problems_are_reported_together() {
        assert_eq!(
            form("ana@example.com", "", "x").validate(),
            vec![FieldProblem::EmptyPassword, FieldProblem::PasswordMismatch]
        );
    }

    #[test]
    fn debug_output_hides_passwords() {
        let dump = format!("{:?}", form("ana@example.com", "secret", "secret"));
        assert!(dump.contains("ana@example.com"));
        assert!(!dump.contains("secret"));
    }
}
