//! Builds the single lookup statement for a [`CutoffQuery`].
//!
//! Identifiers (the phase table and the category column) come only from the
//! closed catalog enums. Every value the user typed goes through `push_bind`.

use eamcet_core::{Category, CutoffQuery};
use sqlx::{Postgres, QueryBuilder};

fn quoted(category: Category) -> String {
    format!("\"{}\"", category.code())
}

/// Build the lookup statement.
///
/// Output columns are cast so decoding does not depend on the exact integer
/// or text types of the hosted tables. Postgres only accepts ORDER BY terms
/// from the select list under DISTINCT, hence the `last_rank` alias.
pub fn build_query(query: &CutoffQuery) -> QueryBuilder<'static, Postgres> {
    let column = quoted(query.category);
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT DISTINCT \"INST_CODE\"::text AS inst_code, \
         \"INSTITUTE_NAME\"::text AS institute_name, \
         \"PLACE\"::text AS place, \
         \"BRANCH_NAME\"::text AS branch_name, \
         \"TUITION_FEE\"::bigint AS tuition_fee, \
         \"AFFILIATED\"::text AS affiliated, ",
    );

    builder
        .push(&column)
        .push("::bigint AS last_rank FROM ")
        .push(query.phase.table())
        .push(" WHERE \"BRANCH\" = ")
        .push_bind(query.branch.code())
        .push(" AND ")
        .push(&column)
        .push(" >= ")
        .push_bind(query.rank);

    if query.category.is_boys() {
        builder.push(" AND ").push(&column).push(" <> 0");
    }
    if let Some(college_type) = query.college_type {
        builder
            .push(" AND \"TYPE\" = ")
            .push_bind(college_type.code());
    }
    if let Some(coed) = query.coed {
        builder.push(" AND \"COED\" = ").push_bind(coed.code());
    }
    if let Some(affiliation) = query.affiliation {
        builder
            .push(" AND \"AFFILIATED\" = ")
            .push_bind(affiliation.code());
    }

    builder.push(" ORDER BY last_rank ASC");
    builder
}
