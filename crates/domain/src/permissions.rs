use std::str::FromStr;

use clinica_core::AppError;
use serde::{Deserialize, Serialize};

/// Fine-grained capability flags attached to a user.
///
/// Only consulted for [`crate::Role::Outro`]. Persisted as a flat object with
/// exactly these eight camelCase boolean fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularPermissions {
    /// Create, modify and delete appointments of any professional.
    pub agenda_edicao: bool,
    /// View the shared agenda of every professional.
    pub agenda_visualizacao: bool,
    /// View and manage patient debt records.
    pub financeiro_debitos_pacientes: bool,
    /// Financial visibility limited to the holder's own entries.
    pub financeiro_apenas_proprios: bool,
    /// Full financial visibility, including reports and commissions.
    pub financeiro_acesso_completo: bool,
    /// Practitioners management area.
    pub menu_profissionais: bool,
    /// Clients and patients management area.
    pub menu_clientes: bool,
    /// Services catalog area.
    pub menu_servicos: bool,
}

/// Returns a fresh permission record with every flag disabled.
#[must_use]
pub fn create_default_permissions() -> GranularPermissions {
    GranularPermissions::default()
}

impl GranularPermissions {
    /// Returns the value of one flag.
    #[must_use]
    pub fn flag(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::AgendaEdicao => self.agenda_edicao,
            PermissionFlag::AgendaVisualizacao => self.agenda_visualizacao,
            PermissionFlag::FinanceiroDebitosPacientes => self.financeiro_debitos_pacientes,
            PermissionFlag::FinanceiroApenasProprios => self.financeiro_apenas_proprios,
            PermissionFlag::FinanceiroAcessoCompleto => self.financeiro_acesso_completo,
            PermissionFlag::MenuProfissionais => self.menu_profissionais,
            PermissionFlag::MenuClientes => self.menu_clientes,
            PermissionFlag::MenuServicos => self.menu_servicos,
        }
    }

    /// Sets one flag.
    pub fn set_flag(&mut self, flag: PermissionFlag, value: bool) {
        let slot = match flag {
            PermissionFlag::AgendaEdicao => &mut self.agenda_edicao,
            PermissionFlag::AgendaVisualizacao => &mut self.agenda_visualizacao,
            PermissionFlag::FinanceiroDebitosPacientes => &mut self.financeiro_debitos_pacientes,
            PermissionFlag::FinanceiroApenasProprios => &mut self.financeiro_apenas_proprios,
            PermissionFlag::FinanceiroAcessoCompleto => &mut self.financeiro_acesso_completo,
            PermissionFlag::MenuProfissionais => &mut self.menu_profissionais,
            PermissionFlag::MenuClientes => &mut self.menu_clientes,
            PermissionFlag::MenuServicos => &mut self.menu_servicos,
        };
        *slot = value;
    }

    /// Returns a copy with one flag set.
    #[must_use]
    pub fn with_flag(mut self, flag: PermissionFlag, value: bool) -> Self {
        self.set_flag(flag, value);
        self
    }

    /// Returns the enabled flags in declaration order.
    pub fn granted_flags(&self) -> impl Iterator<Item = PermissionFlag> + '_ {
        PermissionFlag::all()
            .iter()
            .copied()
            .filter(|flag| self.flag(*flag))
    }

    /// Applies a financial scope choice the way the permissions editor does.
    ///
    /// Enabling one scope clears the other; disabling only clears the chosen
    /// one. Evaluation never relies on this: stored records may still carry
    /// both scopes.
    pub fn set_financial_scope(&mut self, scope: FinancialScope, enabled: bool) {
        let (chosen, other) = match scope {
            FinancialScope::OwnEntries => (
                PermissionFlag::FinanceiroApenasProprios,
                PermissionFlag::FinanceiroAcessoCompleto,
            ),
            FinancialScope::Full => (
                PermissionFlag::FinanceiroAcessoCompleto,
                PermissionFlag::FinanceiroApenasProprios,
            ),
        };

        self.set_flag(chosen, enabled);
        if enabled {
            self.set_flag(other, false);
        }
    }
}

/// Financial visibility scopes offered by the permissions editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialScope {
    /// Only the holder's own financial entries.
    OwnEntries,
    /// Every financial entry of the tenant.
    Full,
}

/// Section a flag is listed under in the permissions editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionGroup {
    /// Appointment scheduling.
    Agenda,
    /// Financial records.
    Financeiro,
    /// Management menus.
    Menus,
}

impl PermissionGroup {
    /// Returns the section title.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Agenda => "Agenda",
            Self::Financeiro => "Financeiro",
            Self::Menus => "Menus",
        }
    }
}

/// Name of a single granular permission flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionFlag {
    /// `agendaEdicao`.
    #[serde(rename = "agendaEdicao")]
    AgendaEdicao,
    /// `agendaVisualizacao`.
    #[serde(rename = "agendaVisualizacao")]
    AgendaVisualizacao,
    /// `financeiroDebitosPacientes`.
    #[serde(rename = "financeiroDebitosPacientes")]
    FinanceiroDebitosPacientes,
    /// `financeiroApenasProprios`.
    #[serde(rename = "financeiroApenasProprios")]
    FinanceiroApenasProprios,
    /// `financeiroAcessoCompleto`.
    #[serde(rename = "financeiroAcessoCompleto")]
    FinanceiroAcessoCompleto,
    /// `menuProfissionais`.
    #[serde(rename = "menuProfissionais")]
    MenuProfissionais,
    /// `menuClientes`.
    #[serde(rename = "menuClientes")]
    MenuClientes,
    /// `menuServicos`.
    #[serde(rename = "menuServicos")]
    MenuServicos,
}

impl PermissionFlag {
    /// Returns the persisted field name of this flag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgendaEdicao => "agendaEdicao",
            Self::AgendaVisualizacao => "agendaVisualizacao",
            Self::FinanceiroDebitosPacientes => "financeiroDebitosPacientes",
            Self::FinanceiroApenasProprios => "financeiroApenasProprios",
            Self::FinanceiroAcessoCompleto => "financeiroAcessoCompleto",
            Self::MenuProfissionais => "menuProfissionais",
            Self::MenuClientes => "menuClientes",
            Self::MenuServicos => "menuServicos",
        }
    }

    /// Returns the checkbox label used by the permissions editor.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AgendaEdicao => "Edição de agendamentos",
            Self::AgendaVisualizacao => "Visualização da agenda",
            Self::FinanceiroDebitosPacientes => "Débitos de pacientes",
            Self::FinanceiroApenasProprios => "Apenas lançamentos próprios",
            Self::FinanceiroAcessoCompleto => "Acesso completo ao financeiro",
            Self::MenuProfissionais => "Profissionais",
            Self::MenuClientes => "Clientes",
            Self::MenuServicos => "Serviços",
        }
    }

    /// Returns the editor section of this flag.
    #[must_use]
    pub fn group(&self) -> PermissionGroup {
        match self {
            Self::AgendaEdicao | Self::AgendaVisualizacao => PermissionGroup::Agenda,
            Self::FinanceiroDebitosPacientes
            | Self::FinanceiroApenasProprios
            | Self::FinanceiroAcessoCompleto => PermissionGroup::Financeiro,
            Self::MenuProfissionais | Self::MenuClientes | Self::MenuServicos => {
                PermissionGroup::Menus
            }
        }
    }

    /// Returns all flags in declaration order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionFlag] = &[
            PermissionFlag::AgendaEdicao,
            PermissionFlag::AgendaVisualizacao,
            PermissionFlag::FinanceiroDebitosPacientes,
            PermissionFlag::FinanceiroApenasProprios,
            PermissionFlag::FinanceiroAcessoCompleto,
            PermissionFlag::MenuProfissionais,
            PermissionFlag::MenuClientes,
            PermissionFlag::MenuServicos,
        ];

        ALL
    }
}

impl FromStr for PermissionFlag {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|flag| flag.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission flag '{value}'")))
    }
}
