//! Client-facing messages shared by every service.

pub const INVALID_JSON: &str = "JSON inválido";
pub const ROUTE_NOT_FOUND: &str = "Rota não encontrada";
pub const METHOD_NOT_ALLOWED: &str = "Método não permitido";
pub const INTERNAL_ERROR: &str = "Erro no servidor, tente novamente mais tarde!";
