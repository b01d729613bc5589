//! Interactive application state and command handling.
//!
//! # Responsibility
//! - Own the UI state: form fields, search text, edit marker, inline error.
//! - Translate parsed commands into service calls and rendered output.
//!
//! # Invariants
//! - The edit marker always points at a live sequence position: saving or
//!   removing the marked row clears it, and removing an earlier row shifts
//!   it down by one.
//! - Storage-level failures are logged, never rendered to the user.

use crate::table::render_table;
use cadastro_core::{
    filter_by_first_name, FormError, NumericField, RegistrationForm, RegistrationService,
    SlotRepository, SubmitError, SubmitOutcome,
};
use log::{error, warn};

/// Mutable UI state behind the form, search box and table controls.
#[derive(Debug, Default)]
pub struct AppState {
    pub form: RegistrationForm,
    pub search: String,
    pub edit_position: Option<usize>,
    pub error: Option<String>,
}

/// One parsed line of user input. Row numbers are 0-based here; the parser
/// converts from the 1-based numbers shown in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFirstName(String),
    SetLastName(String),
    SetAge(String),
    SetOrderCount(String),
    Save,
    Cancel,
    Edit(usize),
    Remove(usize),
    Search(String),
    List,
    Help,
    Quit,
}

/// What the loop should do after one command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// Parses one input line into a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "nome" => Ok(Command::SetFirstName(rest.to_string())),
        "sobrenome" => Ok(Command::SetLastName(rest.to_string())),
        "idade" => Ok(Command::SetAge(rest.to_string())),
        "pedidos" => Ok(Command::SetOrderCount(rest.to_string())),
        "salvar" => Ok(Command::Save),
        "cancelar" => Ok(Command::Cancel),
        "editar" => parse_row_number(rest).map(Command::Edit),
        "remover" => parse_row_number(rest).map(Command::Remove),
        "buscar" => Ok(Command::Search(rest.to_string())),
        "listar" => Ok(Command::List),
        "ajuda" | "?" => Ok(Command::Help),
        "sair" => Ok(Command::Quit),
        other => Err(format!(
            "comando desconhecido: `{other}` (digite `ajuda` para a lista)"
        )),
    }
}

fn parse_row_number(raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .ok()
        .filter(|number| *number >= 1)
        .map(|number| number - 1)
        .ok_or_else(|| String::from("informe o número da linha, ex.: `editar 2`"))
}

/// Inline error text for a rejected form, in the UI language.
pub fn form_error_message(error: FormError) -> &'static str {
    match error {
        FormError::MissingFields => "Por favor, preencha todos os campos!",
        FormError::InvalidNumber(NumericField::Age) => "Digite uma idade válida!",
        FormError::InvalidNumber(NumericField::OrderCount) => {
            "Digite um número de pedidos válido!"
        }
    }
}

pub fn help_text() -> &'static str {
    "comandos:
  nome <texto>       preenche o campo nome
  sobrenome <texto>  preenche o campo sobrenome
  idade <número>     preenche o campo idade
  pedidos <número>   preenche o campo pedidos
  salvar             adiciona (ou atualiza a linha em edição)
  editar <linha>     carrega a linha no formulário
  remover <linha>    remove a linha
  buscar [texto]     filtra por nome (vazio mostra todos)
  listar             mostra a tabela
  cancelar           limpa o formulário e o modo de edição
  sair               encerra"
}

/// The interactive application: UI state plus the registration service.
pub struct App<R: SlotRepository> {
    pub state: AppState,
    service: RegistrationService<R>,
}

impl<R: SlotRepository> App<R> {
    pub fn new(service: RegistrationService<R>) -> Self {
        Self {
            state: AppState::default(),
            service,
        }
    }

    /// Loads the persisted sequence. Returns the loaded count.
    pub fn hydrate(&mut self) -> usize {
        self.service.hydrate()
    }

    /// Applies one command and returns what to print next.
    pub fn handle(&mut self, command: Command) -> Step {
        match command {
            Command::SetFirstName(value) => {
                self.state.form.first_name = value;
                Step::Continue(self.render_form())
            }
            Command::SetLastName(value) => {
                self.state.form.last_name = value;
                Step::Continue(self.render_form())
            }
            Command::SetAge(value) => {
                self.state.form.age = value;
                Step::Continue(self.render_form())
            }
            Command::SetOrderCount(value) => {
                self.state.form.order_count = value;
                Step::Continue(self.render_form())
            }
            Command::Save => Step::Continue(self.save()),
            Command::Cancel => {
                self.reset_form();
                Step::Continue(String::from("formulário limpo."))
            }
            Command::Edit(position) => Step::Continue(self.begin_edit(position)),
            Command::Remove(position) => Step::Continue(self.remove(position)),
            Command::Search(text) => {
                self.state.search = text;
                Step::Continue(self.render_table())
            }
            Command::List => Step::Continue(self.render_table()),
            Command::Help => Step::Continue(String::from(help_text())),
            Command::Quit => Step::Quit,
        }
    }

    fn save(&mut self) -> String {
        match self.service.submit(&self.state.form, self.state.edit_position) {
            Ok(SubmitOutcome::Added) => {
                self.reset_form();
                format!("usuário adicionado.\n{}", self.render_table())
            }
            Ok(SubmitOutcome::Updated { position }) => {
                self.reset_form();
                format!("linha {} atualizada.\n{}", position + 1, self.render_table())
            }
            Err(SubmitError::Form(form_error)) => {
                self.state.error = Some(String::from(form_error_message(form_error)));
                self.render_form()
            }
            Err(SubmitError::Store(store_error)) => {
                // Only reachable with a stale marker; drop it so the next
                // save appends instead of targeting a removed position.
                error!("event=submit module=cli status=error error={store_error}");
                self.state.edit_position = None;
                self.render_form()
            }
        }
    }

    fn begin_edit(&mut self, position: usize) -> String {
        match self.service.get(position) {
            Some(record) => {
                self.state.form = RegistrationForm {
                    first_name: record.first_name.clone(),
                    last_name: record.last_name.clone(),
                    age: record.age.to_string(),
                    order_count: record
                        .order_count
                        .map_or_else(String::new, |count| count.to_string()),
                };
                self.state.edit_position = Some(position);
                self.state.error = None;
                self.render_form()
            }
            None => format!("linha {} não existe.", position + 1),
        }
    }

    fn remove(&mut self, position: usize) -> String {
        match self.service.remove(position) {
            Ok(removed) => {
                match self.state.edit_position {
                    Some(marked) if marked == position => {
                        self.state.form = RegistrationForm::default();
                        self.state.edit_position = None;
                    }
                    Some(marked) if marked > position => {
                        self.state.edit_position = Some(marked - 1);
                    }
                    _ => {}
                }
                format!("{} removido(a).\n{}", removed.first_name, self.render_table())
            }
            Err(store_error) => {
                warn!("event=remove module=cli status=rejected error={store_error}");
                format!("linha {} não existe.", position + 1)
            }
        }
    }

    fn reset_form(&mut self) {
        self.state.form = RegistrationForm::default();
        self.state.edit_position = None;
        self.state.error = None;
    }

    fn render_form(&self) -> String {
        let form = &self.state.form;
        let mode = match self.state.edit_position {
            Some(position) => format!("atualizar linha {}", position + 1),
            None => String::from("adicionar"),
        };
        let mut out = format!(
            "nome: [{}]  sobrenome: [{}]  idade: [{}]  pedidos: [{}]\nmodo: {mode}",
            form.first_name, form.last_name, form.age, form.order_count
        );
        if let Some(error) = &self.state.error {
            out.push_str("\nErro: ");
            out.push_str(error);
        }
        out
    }

    fn render_table(&self) -> String {
        let rows = filter_by_first_name(self.service.records(), &self.state.search);
        if self.state.search.is_empty() {
            render_table(&rows)
        } else {
            format!("busca: \"{}\"\n{}", self.state.search, render_table(&rows))
        }
    }
}
