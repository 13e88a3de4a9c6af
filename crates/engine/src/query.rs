//! Parity-based selection between the two fixed SQL answers.
//!
//! The value examined is formed by the last one or two ASCII digits of the
//! registration number; every other character is ignored. No digits at all
//! counts as 0.

/// Highest salary not paid on the 1st of a month, with the employee's name,
/// age, and department.
pub const QUESTION_1_SQL: &str = concat!(
    "SELECT p.amount AS SALARY, ",
    "CONCAT(e.first_name, ' ', e.last_name) AS NAME, ",
    "TIMESTAMPDIFF(YEAR, e.dob, CURDATE()) AS AGE, ",
    "d.department_name AS DEPARTMENT_NAME ",
    "FROM payments p ",
    "JOIN employee e ON p.emp_id = e.emp_id ",
    "JOIN department d ON e.department = d.department_id ",
    "WHERE DAY(p.payment_time) <> 1 ",
    "AND p.amount = ( ",
    "  SELECT MAX(amount) ",
    "  FROM payments ",
    "  WHERE DAY(payment_time) <> 1 );",
);

/// Per employee, how many colleagues in the same department are younger.
pub const QUESTION_2_SQL: &str = concat!(
    "SELECT e.emp_id, ",
    "e.first_name, ",
    "e.last_name, ",
    "d.department_name, ",
    "(SELECT COUNT(*) ",
    " FROM employee e2 ",
    " WHERE e2.department = e.department ",
    " AND e2.dob > e.dob) AS younger_employees_count ",
    "FROM employee e ",
    "LEFT JOIN department d ON e.department = d.department_id ",
    "ORDER BY e.emp_id DESC;",
);

/// One of the two fixed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryVariant {
    /// Selected when the trailing value is odd.
    QueryA,
    /// Selected when the trailing value is even.
    QueryB,
}

impl QueryVariant {
    pub fn sql(self) -> &'static str {
        match self {
            QueryVariant::QueryA => QUESTION_1_SQL,
            QueryVariant::QueryB => QUESTION_2_SQL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QueryVariant::QueryA => "Question 1",
            QueryVariant::QueryB => "Question 2",
        }
    }
}

/// Integer value of the last one or two digits in `reg_no`.
pub fn last_two_digits(reg_no: &str) -> u32 {
    let digits: Vec<u32> = reg_no.chars().filter_map(|c| c.to_digit(10)).collect();
    match digits.as_slice() {
        [] => 0,
        [only] => *only,
        [.., tens, ones] => tens * 10 + ones,
    }
}

/// Odd → [`QueryVariant::QueryA`], even → [`QueryVariant::QueryB`].
pub fn select_query(reg_no: &str) -> QueryVariant {
    if last_two_digits(reg_no) % 2 == 1 {
        QueryVariant::QueryA
    } else {
        QueryVariant::QueryB
    }
}
