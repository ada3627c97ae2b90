use clinica_core::TenantId;
use clinica_domain::{EmailAddress, GranularPermissions, PolicyUser, Role};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tenant user document in its persisted shape.
///
/// Every field is optional because older documents predate most of them.
/// Normalization into a [`PolicyUser`] happens in
/// [`StoredUserDocument::into_policy_user`] and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUserDocument {
    /// Authentication uid; falls back to the document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Raw role tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Activation flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
    /// Granular permission flags, present for `outro` users.
    ///
    /// Written as `null` for every other role so a role change clears stale flags.
    #[serde(default)]
    pub permissions: Option<StoredPermissions>,
    /// Linked professional record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<String>,
    /// Owning company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

/// Permission flags as persisted. Flags added after a document was written
/// are simply absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPermissions {
    #[serde(default)]
    agenda_edicao: Option<bool>,
    #[serde(default)]
    agenda_visualizacao: Option<bool>,
    #[serde(default)]
    financeiro_debitos_pacientes: Option<bool>,
    #[serde(default)]
    financeiro_apenas_proprios: Option<bool>,
    #[serde(default)]
    financeiro_acesso_completo: Option<bool>,
    #[serde(default)]
    menu_profissionais: Option<bool>,
    #[serde(default)]
    menu_clientes: Option<bool>,
    #[serde(default)]
    menu_servicos: Option<bool>,
}

impl StoredPermissions {
    fn normalize(self) -> GranularPermissions {
        GranularPermissions {
            agenda_edicao: self.agenda_edicao.unwrap_or(false),
            agenda_visualizacao: self.agenda_visualizacao.unwrap_or(false),
            financeiro_debitos_pacientes: self.financeiro_debitos_pacientes.unwrap_or(false),
            financeiro_apenas_proprios: self.financeiro_apenas_proprios.unwrap_or(false),
            financeiro_acesso_completo: self.financeiro_acesso_completo.unwrap_or(false),
            menu_profissionais: self.menu_profissionais.unwrap_or(false),
            menu_clientes: self.menu_clientes.unwrap_or(false),
            menu_servicos: self.menu_servicos.unwrap_or(false),
        }
    }
}

impl From<GranularPermissions> for StoredPermissions {
    fn from(value: GranularPermissions) -> Self {
        Self {
            agenda_edicao: Some(value.agenda_edicao),
            agenda_visualizacao: Some(value.agenda_visualizacao),
            financeiro_debitos_pacientes: Some(value.financeiro_debitos_pacientes),
            financeiro_apenas_proprios: Some(value.financeiro_apenas_proprios),
            financeiro_acesso_completo: Some(value.financeiro_acesso_completo),
            menu_profissionais: Some(value.menu_profissionais),
            menu_clientes: Some(value.menu_clientes),
            menu_servicos: Some(value.menu_servicos),
        }
    }
}

impl StoredUserDocument {
    /// Returns whether this document may describe the given uid.
    ///
    /// Documents without a `uid` field are identified by their document id alone.
    #[must_use]
    pub fn belongs_to(&self, uid: &str) -> bool {
        self.uid.as_deref().is_none_or(|stored| stored == uid)
    }

    /// Encodes a policy user for persistence under a tenant.
    #[must_use]
    pub fn from_policy_user(user: &PolicyUser, tenant_id: TenantId) -> Self {
        Self {
            uid: Some(user.uid().to_owned()),
            nome: user.display_name().map(str::to_owned),
            email: user.email().map(|email| email.as_str().to_owned()),
            role: Some(user.role().as_str().to_owned()),
            ativo: Some(user.is_active()),
            permissions: user.permissions().copied().map(StoredPermissions::from),
            professional_id: user.professional_id().map(str::to_owned),
            company_id: Some(tenant_id.to_string()),
        }
    }

    /// Normalizes the document into a policy user.
    ///
    /// Returns `None` when the document cannot identify a known role; such
    /// users are denied everything.
    #[must_use]
    pub fn into_policy_user(self, document_id: &str) -> Option<PolicyUser> {
        let Some(role) = self.role.as_deref().and_then(Role::parse_stored) else {
            warn!(
                document_id,
                role = self.role.as_deref().unwrap_or("<missing>"),
                "user document has no recognized role"
            );
            return None;
        };

        let uid = self
            .uid
            .filter(|uid| !uid.trim().is_empty())
            .unwrap_or_else(|| document_id.to_owned());

        let user = match PolicyUser::new(uid, role) {
            Ok(user) => user,
            Err(error) => {
                warn!(document_id, %error, "user document has no usable uid");
                return None;
            }
        };

        let email = self.email.and_then(|raw| match EmailAddress::new(raw) {
            Ok(email) => Some(email),
            Err(error) => {
                warn!(document_id, %error, "ignoring malformed user email");
                None
            }
        });

        Some(
            user.with_permissions(self.permissions.map(StoredPermissions::normalize))
                .with_active(self.ativo.unwrap_or(false))
                .with_email(email)
                .with_display_name(self.nome)
                .with_professional_id(self.professional_id),
        )
    }
}
