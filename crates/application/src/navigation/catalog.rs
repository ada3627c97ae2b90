use clinica_core::AppResult;
use clinica_domain::{Capability, NavigationItem, Role};

const FULL: &[Role] = &[Role::Owner, Role::Admin];
const PLATFORM: &[Role] = &[Role::SuperAdmin];

/// Returns the product sidebar before any per-user filtering.
pub fn clinic_navigation() -> AppResult<Vec<NavigationItem>> {
    let company = Role::company_roles();

    Ok(vec![
        NavigationItem::new("admin_panel", "Painel Admin", Some("/admin"), PLATFORM)?
            .with_icon("activity"),
        NavigationItem::new("admin_leads", "Leads", Some("/admin/leads"), PLATFORM)?
            .with_icon("users"),
        NavigationItem::new("admin_companies", "Empresas", Some("/admin/empresas"), PLATFORM)?
            .with_icon("building-2"),
        NavigationItem::new("home", "Inicial", Some("/"), company)?.with_icon("layout-dashboard"),
        NavigationItem::new("agenda", "Agenda", Some("/agenda"), company)?
            .with_icon("calendar")
            .with_requirement(Capability::OpenAgenda),
        NavigationItem::new("patients", "Pacientes", Some("/pacientes"), company)?
            .with_icon("heart-pulse")
            .with_requirement(Capability::OpenPatients),
        NavigationItem::new(
            "messages",
            "Mensagens",
            Some("/mensagens"),
            &[Role::Owner, Role::Admin, Role::Atendente, Role::Outro],
        )?
        .with_icon("message-circle"),
        NavigationItem::new(
            "reports",
            "Relatórios",
            Some("/relatorios"),
            &[Role::Owner, Role::Admin, Role::Outro],
        )?
        .with_icon("bar-chart-3")
        .with_requirement(Capability::FullFinancials),
        NavigationItem::new("settings", "Configurações", None, FULL)?
            .with_icon("settings")
            .with_children(settings_entries()?),
        NavigationItem::new("help", "Ajuda", Some("/ajuda"), company)?.with_icon("help-circle"),
    ])
}

fn settings_entries() -> AppResult<Vec<NavigationItem>> {
    let company = Role::company_roles();

    Ok(vec![
        NavigationItem::new("settings_general", "Geral", Some("/configuracoes"), FULL)?
            .with_icon("settings"),
        NavigationItem::new(
            "professionals",
            "Profissionais",
            Some("/profissionais"),
            &[Role::Owner, Role::Admin, Role::Outro],
        )?
        .with_icon("user-check")
        .with_requirement(Capability::ProfessionalsMenu),
        NavigationItem::new("services", "Serviços", Some("/servicos"), company)?
            .with_icon("package")
            .with_requirement(Capability::OpenServices),
        NavigationItem::new("users", "Usuários", Some("/usuarios"), FULL)?.with_icon("users"),
        NavigationItem::new(
            "anamnesis_templates",
            "Modelos de anamnese",
            Some("/configuracoes/modelos-anamnese"),
            FULL,
        )?
        .with_icon("file-text"),
        NavigationItem::new("plan", "Plano", Some("/plano"), FULL)?.with_icon("credit-card"),
        NavigationItem::new("profile", "Meu Perfil", Some("/perfil"), company)?
            .with_icon("user"),
    ])
}
