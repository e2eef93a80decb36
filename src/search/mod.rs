/// A generated SQL statement plus its positional parameters.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}

/// Contact search filter: owner equality is mandatory, the rest are
/// optional case-insensitive substring clauses ANDed together. The name
/// clause matches first OR last name. Fixed clause set by design; there
/// is no generic predicate tree to build at runtime.
#[derive(Debug, Clone)]
pub struct ContactSearch {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Zero-based page index
    pub page: i64,
    pub size: i64,
}

impl ContactSearch {
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }

    /// Page count for a given total row count, ceiling division.
    pub fn total_pages(&self, total_elements: i64) -> i64 {
        if total_elements == 0 {
            0
        } else {
            (total_elements + self.size - 1) / self.size
        }
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = self.build_where();
        let query = format!(
            "SELECT * FROM \"contacts\" WHERE {} ORDER BY \"created_at\", \"id\" LIMIT {} OFFSET {}",
            where_clause,
            self.size,
            self.offset()
        );
        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.build_where();
        let query = format!(
            "SELECT COUNT(*) FROM \"contacts\" WHERE {}",
            where_clause
        );
        SqlResult { query, params }
    }

    fn build_where(&self) -> (String, Vec<String>) {
        let mut conditions = vec!["\"username\" = $1".to_string()];
        let mut params = vec![self.username.clone()];

        if let Some(name) = &self.name {
            params.push(format!("%{}%", name));
            let n = params.len();
            conditions.push(format!(
                "(\"first_name\" ILIKE ${} OR \"last_name\" ILIKE ${})",
                n, n
            ));
        }

        if let Some(email) = &self.email {
            params.push(format!("%{}%", email));
            conditions.push(format!("\"email\" ILIKE ${}", params.len()));
        }

        if let Some(phone) = &self.phone {
            params.push(format!("%{}%", phone));
            conditions.push(format!("\"phone\" ILIKE ${}", params.len()));
        }

        (conditions.join(" AND "), params)
    }
}
