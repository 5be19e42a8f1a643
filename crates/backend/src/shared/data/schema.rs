//! SQLite schema of the HR module.
//!
//! Every tenant-owned table carries `created_by`; a row is visible to a
//! tenant when its `created_by` is one of the tenant's owner ids.

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        user_type TEXT NOT NULL DEFAULT 'employee',
        lang TEXT NOT NULL DEFAULT 'en',
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_users_created_by ON users(created_by);",
    r#"
    CREATE TABLE IF NOT EXISTS branches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        branch_id INTEGER,
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS designations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        department_id INTEGER,
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shifts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        start_time TEXT,
        end_time TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        employee_code TEXT NOT NULL,
        date_of_birth TEXT,
        gender TEXT NOT NULL DEFAULT 'other',
        phone TEXT,
        branch_id INTEGER,
        department_id INTEGER,
        designation_id INTEGER,
        shift_id INTEGER,
        date_of_joining TEXT,
        employment_type TEXT,
        employment_status TEXT,
        national_id TEXT,
        created_by INTEGER NOT NULL,
        created_at TEXT,
        updated_at TEXT
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_employees_code ON employees(employee_code);",
    "CREATE INDEX IF NOT EXISTS idx_employees_created_by ON employees(created_by);",
    r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        shift_id INTEGER,
        date TEXT NOT NULL,
        check_in TEXT,
        check_out TEXT,
        status TEXT,
        is_absent INTEGER NOT NULL DEFAULT 0,
        is_late INTEGER NOT NULL DEFAULT 0,
        late_minutes INTEGER,
        notes TEXT,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_applications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        leave_type_id INTEGER,
        start_date TEXT,
        end_date TEXT,
        total_days REAL,
        reason TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        supervisor TEXT,
        shift TEXT,
        dayoff TEXT,
        comment TEXT,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS warnings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        issued_by INTEGER,
        subject TEXT,
        warning_type TEXT,
        severity TEXT,
        warning_date TEXT,
        status TEXT NOT NULL DEFAULT 'draft',
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contract_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employee_contracts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        contract_type_id INTEGER,
        start_date TEXT,
        end_date TEXT,
        status TEXT NOT NULL DEFAULT 'active',
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS training_programs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employee_trainings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        training_program_id INTEGER,
        assigned_date TEXT,
        start_date TEXT,
        end_date TEXT,
        status TEXT NOT NULL DEFAULT 'assigned',
        score REAL,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resignations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        resignation_date TEXT,
        last_working_day TEXT,
        notice_period INTEGER,
        reason TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        approved_by INTEGER,
        created_by INTEGER NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS terminations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        termination_type TEXT,
        termination_date TEXT,
        notice_date TEXT,
        notice_period INTEGER,
        reason TEXT,
        description TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        approved_by INTEGER,
        created_by INTEGER NOT NULL
    );
    "#,
];
