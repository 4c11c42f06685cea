//! The fixed RLS repair batch
//!
//! Policies read `role` and `company_id` from the JWT's `app_metadata`.
//! `sync_user_claims` keeps those claims in step with the `users` table.
//! Every drop is guarded with `IF EXISTS`, so re-running the batch is safe.

pub const STATEMENTS: &[&str] = &[
    // Companies
    r#"DROP POLICY IF EXISTS "Super admins can do everything on companies" ON companies;"#,
    r#"DROP POLICY IF EXISTS "Users can view their own company" ON companies;"#,
    // Users
    r#"DROP POLICY IF EXISTS "Super admins can do everything on users" ON users;"#,
    r#"DROP POLICY IF EXISTS "Users can view users in their company" ON users;"#,
    r#"DROP POLICY IF EXISTS "Users can update their own profile" ON users;"#,
    r#"DROP POLICY IF EXISTS "Users can read their own profile" ON users;"#,
    // Invitations
    r#"DROP POLICY IF EXISTS "Super admins can manage all invitations" ON invitations;"#,
    r#"DROP POLICY IF EXISTS "Admins can manage invitations for their company" ON invitations;"#,
    r#"CREATE POLICY "Super admins can manage all companies"
  ON companies FOR ALL
  TO authenticated
  USING ((auth.jwt() -> 'app_metadata' ->> 'role') = 'super_admin');"#,
    r#"CREATE POLICY "Users can view own company"
  ON companies FOR SELECT
  TO authenticated
  USING (id = (auth.jwt() -> 'app_metadata' ->> 'company_id')::uuid);"#,
    r#"CREATE POLICY "Super admins can manage all users"
  ON users FOR ALL
  TO authenticated
  USING ((auth.jwt() -> 'app_metadata' ->> 'role') = 'super_admin');"#,
    r#"CREATE POLICY "Admins can manage company users"
  ON users FOR ALL
  TO authenticated
  USING (
    (auth.jwt() -> 'app_metadata' ->> 'role') = 'admin'
    AND company_id = (auth.jwt() -> 'app_metadata' ->> 'company_id')::uuid
  );"#,
    r#"CREATE POLICY "Coordinators can view company users"
  ON users FOR SELECT
  TO authenticated
  USING (
    (auth.jwt() -> 'app_metadata' ->> 'role') = 'coordinator'
    AND company_id = (auth.jwt() -> 'app_metadata' ->> 'company_id')::uuid
  );"#,
    r#"CREATE POLICY "Users can read own profile"
  ON users FOR SELECT
  TO authenticated
  USING (id = auth.uid());"#,
    r#"CREATE POLICY "Users can update own profile"
  ON users FOR UPDATE
  TO authenticated
  USING (id = auth.uid())
  WITH CHECK (id = auth.uid());"#,
    r#"CREATE POLICY "Super admins can manage all invitations"
  ON invitations FOR ALL
  TO authenticated
  USING ((auth.jwt() -> 'app_metadata' ->> 'role') = 'super_admin');"#,
    r#"CREATE POLICY "Admins can manage company invitations"
  ON invitations FOR ALL
  TO authenticated
  USING (
    (auth.jwt() -> 'app_metadata' ->> 'role') = 'admin'
    AND company_id = (auth.jwt() -> 'app_metadata' ->> 'company_id')::uuid
  );"#,
    r#"CREATE OR REPLACE FUNCTION sync_user_claims()
RETURNS TRIGGER AS $$
BEGIN
  UPDATE auth.users
  SET raw_app_meta_data = COALESCE(raw_app_meta_data, '{}'::jsonb) || jsonb_build_object(
    'role', NEW.role,
    'company_id', NEW.company_id
  )
  WHERE id = NEW.id;

  RETURN NEW;
END;
$$ LANGUAGE plpgsql SECURITY DEFINER;"#,
    "DROP TRIGGER IF EXISTS on_user_created ON users;",
    "DROP TRIGGER IF EXISTS on_user_updated ON users;",
    r#"CREATE TRIGGER on_user_created
  AFTER INSERT ON users
  FOR EACH ROW
  EXECUTE FUNCTION sync_user_claims();"#,
    r#"CREATE TRIGGER on_user_updated
  AFTER UPDATE OF role, company_id ON users
  FOR EACH ROW
  WHEN (OLD.role IS DISTINCT FROM NEW.role OR OLD.company_id IS DISTINCT FROM NEW.company_id)
  EXECUTE FUNCTION sync_user_claims();"#,
];
