// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut PgConnection` borrowed
// from a transaction (atomic operations).

pub mod curso;
pub mod resposta;
pub mod topico;
