//! Demonstration tables loaded by `-sampledata`. Each block checks
//! `USER_TABLES` first so running it twice is harmless.

const CREATE_DEPARTMENT: &str = r#"
DECLARE
  found INTEGER;
BEGIN
  SELECT COUNT(*) INTO found FROM USER_TABLES WHERE TABLE_NAME = 'DEPARTMENT';
  IF found = 0 THEN
    EXECUTE IMMEDIATE 'CREATE TABLE DEPARTMENT(
                         DEPTNO CHAR(3) NOT NULL,
                         DEPTNAME VARCHAR2(36) NOT NULL,
                         MGRNO CHAR(6),
                         ADMRDEPT CHAR(3) NOT NULL)';
    EXECUTE IMMEDIATE 'INSERT ALL
      INTO DEPARTMENT VALUES (''A00'',''SPIFFY COMPUTER SERVICE DIV.'',''000010'',''A00'')
      INTO DEPARTMENT VALUES (''B01'',''PLANNING'',''000020'',''A00'')
      INTO DEPARTMENT VALUES (''C01'',''INFORMATION CENTER'',''000030'',''A00'')
      INTO DEPARTMENT VALUES (''D01'',''DEVELOPMENT CENTER'',NULL,''A00'')
      INTO DEPARTMENT VALUES (''D11'',''MANUFACTURING SYSTEMS'',''000060'',''D01'')
      INTO DEPARTMENT VALUES (''D21'',''ADMINISTRATION SYSTEMS'',''000070'',''D01'')
      INTO DEPARTMENT VALUES (''E01'',''SUPPORT SERVICES'',''000050'',''A00'')
      INTO DEPARTMENT VALUES (''E11'',''OPERATIONS'',''000090'',''E01'')
      INTO DEPARTMENT VALUES (''E21'',''SOFTWARE SUPPORT'',''000100'',''E01'')
      SELECT 1 FROM DUAL';
  END IF;
END;"#;

const CREATE_EMPLOYEE: &str = r#"
DECLARE
  found INTEGER;
BEGIN
  SELECT COUNT(*) INTO found FROM USER_TABLES WHERE TABLE_NAME = 'EMPLOYEE';
  IF found = 0 THEN
    EXECUTE IMMEDIATE 'CREATE TABLE EMPLOYEE(
                         EMPNO CHAR(6) NOT NULL,
                         FIRSTNME VARCHAR2(12) NOT NULL,
                         MIDINIT CHAR(1),
                         LASTNAME VARCHAR2(15) NOT NULL,
                         WORKDEPT CHAR(3),
                         PHONENO CHAR(4),
                         HIREDATE DATE,
                         JOB CHAR(8),
                         EDLEVEL NUMBER(5) NOT NULL,
                         SEX CHAR(1),
                         BIRTHDATE DATE,
                         SALARY NUMBER(9,2),
                         BONUS NUMBER(9,2),
                         COMM NUMBER(9,2))';
    EXECUTE IMMEDIATE 'INSERT ALL
      INTO EMPLOYEE VALUES (''000010'',''CHRISTINE'',''I'',''HAAS'',''A00'',''3978'',DATE ''1995-01-01'',''PRES'',18,''F'',DATE ''1963-08-24'',152750.00,1000.00,4220.00)
      INTO EMPLOYEE VALUES (''000020'',''MICHAEL'',''L'',''THOMPSON'',''B01'',''3476'',DATE ''2003-10-10'',''MANAGER'',18,''M'',DATE ''1978-02-02'',94250.00,800.00,3300.00)
      INTO EMPLOYEE VALUES (''000030'',''SALLY'',''A'',''KWAN'',''C01'',''4738'',DATE ''2005-04-05'',''MANAGER'',20,''F'',DATE ''1971-05-11'',98250.00,800.00,3060.00)
      INTO EMPLOYEE VALUES (''000050'',''JOHN'',''B'',''GEYER'',''E01'',''6789'',DATE ''1979-08-17'',''MANAGER'',16,''M'',DATE ''1955-09-15'',80175.00,800.00,3214.00)
      INTO EMPLOYEE VALUES (''000060'',''IRVING'',''F'',''STERN'',''D11'',''6423'',DATE ''2003-09-14'',''MANAGER'',16,''M'',DATE ''1975-07-07'',72250.00,500.00,2580.00)
      INTO EMPLOYEE VALUES (''000070'',''EVA'',''D'',''PULASKI'',''D21'',''7831'',DATE ''2005-09-30'',''MANAGER'',16,''F'',DATE ''2003-05-26'',96170.00,700.00,2893.00)
      INTO EMPLOYEE VALUES (''000090'',''EILEEN'',''W'',''HENDERSON'',''E11'',''5498'',DATE ''2000-08-15'',''MANAGER'',16,''F'',DATE ''1971-05-15'',89750.00,600.00,2380.00)
      INTO EMPLOYEE VALUES (''000100'',''THEODORE'',''Q'',''SPENSER'',''E21'',''0972'',DATE ''2000-06-19'',''MANAGER'',14,''M'',DATE ''1980-12-18'',86150.00,500.00,2092.00)
      INTO EMPLOYEE VALUES (''000110'',''VINCENZO'',''G'',''LUCCHESSI'',''A00'',''3490'',DATE ''1988-05-16'',''SALESREP'',19,''M'',DATE ''1959-11-05'',66500.00,900.00,3720.00)
      INTO EMPLOYEE VALUES (''000120'',''SEAN'',NULL,''O''''CONNELL'',''A00'',''2167'',DATE ''1993-12-05'',''CLERK'',14,''M'',DATE ''1972-10-18'',49250.00,600.00,2340.00)
      INTO EMPLOYEE VALUES (''000130'',''DELORES'',''M'',''QUINTANA'',''C01'',''4578'',DATE ''2001-07-28'',''ANALYST'',16,''F'',DATE ''1955-09-15'',73800.00,500.00,1904.00)
      INTO EMPLOYEE VALUES (''000140'',''HEATHER'',''A'',''NICHOLLS'',''C01'',''1793'',DATE ''2006-12-15'',''ANALYST'',18,''F'',DATE ''1976-01-19'',68420.00,600.00,2274.00)
      INTO EMPLOYEE VALUES (''000150'',''BRUCE'',NULL,''ADAMSON'',''D11'',''4510'',DATE ''2002-02-12'',''DESIGNER'',16,''M'',DATE ''1977-05-17'',55280.00,500.00,2022.00)
      INTO EMPLOYEE VALUES (''000200'',''DAVID'',NULL,''BROWN'',''D11'',''4501'',DATE ''2002-03-03'',''DESIGNER'',16,''M'',DATE ''1971-05-29'',57740.00,600.00,2217.00)
      INTO EMPLOYEE VALUES (''000290'',''JOHN'',''R'',''PARKER'',''E11'',''4502'',DATE ''2006-05-30'',''OPERATOR'',12,''M'',DATE ''1985-07-09'',35340.00,300.00,1227.00)
      INTO EMPLOYEE VALUES (''000340'',''JASON'',''R'',''GOUNOT'',''E21'',''5698'',DATE ''1977-05-05'',''FIELDREP'',16,''M'',DATE ''1956-05-17'',43840.00,500.00,1907.00)
      SELECT 1 FROM DUAL';
  END IF;
END;"#;

pub const SAMPLE_DATA_BLOCKS: [&str; 2] = [CREATE_DEPARTMENT, CREATE_EMPLOYEE];
