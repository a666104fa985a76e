//! Interactive shell: renders controller state as a page (header stats,
//! card list, pagination row) and translates typed commands into view
//! intents applied to the controller.
//!
//! Error placement follows the failure's origin: a failed load renders as
//! a banner above the list, a failed mutation as an inline message after
//! the command that caused it.

use std::io::{self, BufRead, Write};

use user_admin_core::{
    ErrorOrigin, Transport, UserListController, DEFAULT_LIMIT, DEFAULT_PAGE,
};

use crate::views::card::render_card;
use crate::views::form::UserForm;
use crate::views::pagination::{render_pagination, select_page};
use crate::views::spinner::{Spinner, SpinnerSize};
use crate::views::{FormSubmit, Intent};

const HELP: &str = "\
commands:
  list               re-render the current page
  page <n>           jump to page n
  limit <n>          change the page size (restarts from page 1)
  add                create a user
  edit <id>          edit a user shown on this page
  delete <id>        delete a user (asks for confirmation)
  refresh            reload the current page
  help               show this help
  quit               exit";

pub struct App<T> {
    controller: UserListController<T>,
    spinner: Spinner,
}

impl<T: Transport> App<T> {
    pub fn new(controller: UserListController<T>) -> Self {
        Self {
            controller,
            spinner: Spinner::new(SpinnerSize::Medium),
        }
    }

    pub fn controller(&self) -> &UserListController<T> {
        &self.controller
    }

    /// Initial load plus first render, mirroring the fetch-on-mount of the
    /// page shell.
    pub fn start(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{} Loading users…", self.spinner.frame(0))?;
        self.controller.load(DEFAULT_PAGE, DEFAULT_LIMIT);
        self.render(out)
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let pagination = self.controller.pagination();
        writeln!(out)?;
        writeln!(
            out,
            "User Management — {} users · page {}/{}",
            pagination.total,
            pagination.page,
            pagination.total_pages.max(1)
        )?;
        if let Some(notice) = self.controller.error() {
            if notice.origin == ErrorOrigin::Load {
                writeln!(out, "⚠  {}", notice.message)?;
            }
        }
        if self.controller.users().is_empty() {
            writeln!(out, "No users found. Type `add` to create the first one.")?;
        } else {
            for user in self.controller.users() {
                writeln!(out, "{}", render_card(user, false))?;
            }
        }
        let row = render_pagination(pagination, self.controller.is_loading());
        if !row.is_empty() {
            writeln!(out, "{row}")?;
        }
        Ok(())
    }

    /// Handle one typed command. Returns `false` when the user asked to
    /// quit.
    pub fn handle_command(
        &mut self,
        line: &str,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) => {}
            (Some("help"), _) => writeln!(out, "{HELP}")?,
            (Some("quit" | "q" | "exit"), _) => return Ok(false),
            (Some("list" | "ls"), _) => self.render(out)?,
            (Some("refresh" | "r"), _) => self.apply(Intent::Refresh, input, out)?,
            (Some("page" | "p"), Some(raw)) => match raw.parse::<u32>() {
                Ok(target) => {
                    let intent = select_page(
                        self.controller.pagination(),
                        target,
                        self.controller.is_loading(),
                    );
                    match intent {
                        Some(intent) => self.apply(intent, input, out)?,
                        None => writeln!(out, "page {target} is not available")?,
                    }
                }
                Err(_) => writeln!(out, "usage: page <number>")?,
            },
            (Some("limit"), Some(raw)) => match raw.parse::<u32>() {
                Ok(limit) if limit > 0 => {
                    writeln!(out, "{} Loading users…", self.spinner.frame(0))?;
                    self.controller.change_limit(limit);
                    self.render(out)?;
                }
                _ => writeln!(out, "usage: limit <number>")?,
            },
            (Some("add"), _) => {
                let form = fill_form(UserForm::create(), input, out)?;
                self.submit_form(form, input, out)?;
            }
            (Some("edit"), Some(id)) => {
                let record = self.controller.users().iter().find(|u| u.id == id).cloned();
                match record {
                    Some(user) => self.apply(Intent::Edit(user), input, out)?,
                    None => writeln!(out, "no user with id {id} on this page")?,
                }
            }
            (Some("delete" | "rm"), Some(id)) => {
                self.apply(Intent::Delete(id.to_string()), input, out)?;
            }
            _ => writeln!(out, "unknown command; type `help`")?,
        }
        Ok(true)
    }

    /// Apply one view intent to the controller.
    pub fn apply(
        &mut self,
        intent: Intent,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match intent {
            Intent::Refresh => {
                writeln!(out, "{} Loading users…", self.spinner.frame(0))?;
                self.controller.refresh();
                self.render(out)?;
            }
            Intent::ChangePage(page) => {
                writeln!(out, "{} Loading users…", self.spinner.frame(0))?;
                self.controller.change_page(page);
                self.render(out)?;
            }
            Intent::Edit(user) => {
                let form = fill_form(UserForm::edit(user), input, out)?;
                self.submit_form(form, input, out)?;
            }
            Intent::Submit(FormSubmit::Create(payload)) => {
                match self.controller.create(&payload) {
                    Some(user) => {
                        writeln!(out, "✓ created {}", user.name)?;
                        self.render(out)?;
                    }
                    None => self.report_mutation_error(out)?,
                }
            }
            Intent::Submit(FormSubmit::Update { id, payload }) => {
                match self.controller.update(&id, &payload) {
                    Some(user) => {
                        writeln!(out, "✓ updated {}", user.name)?;
                        self.render(out)?;
                    }
                    None => self.report_mutation_error(out)?,
                }
            }
            Intent::Delete(id) => {
                write!(out, "Delete user {id}? [y/N] ")?;
                out.flush()?;
                let mut answer = String::new();
                input.read_line(&mut answer)?;
                let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
                if confirmed {
                    writeln!(out, "{} Deleting…", self.spinner.frame(0))?;
                }
                if self.controller.delete(&id, || confirmed) {
                    writeln!(out, "✓ deleted")?;
                    self.render(out)?;
                } else if confirmed {
                    self.report_mutation_error(out)?;
                } else {
                    writeln!(out, "cancelled")?;
                }
            }
        }
        Ok(())
    }

    fn submit_form(
        &mut self,
        form: UserForm,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match form.submit() {
            Ok(submission) => self.apply(Intent::Submit(submission), input, out),
            Err(err) => writeln!(out, "✗ {err}"),
        }
    }

    fn report_mutation_error(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(notice) = self.controller.error() {
            if notice.origin == ErrorOrigin::Mutation {
                writeln!(out, "✗ {}", notice.message)?;
            }
        }
        Ok(())
    }
}

fn fill_form(
    mut form: UserForm,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<UserForm> {
    writeln!(out, "{} (blank keeps the shown value)", form.title())?;
    form.name = prompt_field(input, out, "Name", &form.name)?;
    form.email = prompt_field(input, out, "Email", &form.email)?;
    form.age = prompt_field(input, out, "Age (optional)", &form.age)?;
    Ok(form)
}

fn prompt_field(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    current: &str,
) -> io::Result<String> {
    if current.is_empty() {
        write!(out, "{label}: ")?;
    } else {
        write!(out, "{label} [{current}]: ")?;
    }
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim();
    Ok(if value.is_empty() {
        current.to_string()
    } else {
        value.to_string()
    })
}
